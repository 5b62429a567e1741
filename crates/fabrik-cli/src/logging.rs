//! Diagnostics go to stderr so stdout stays free for rendered manifests.
//!
//! `fabrik-core` and `fabrik-adapters` emit events; only the binary installs
//! a subscriber. Under `--output-format json` the events are JSON lines.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events are shown at the level chosen on the command line.
const CRATES: [&str; 3] = ["fabrik", "fabrik_core", "fabrik_adapters"];

/// Install the stderr subscriber. `RUST_LOG`, when set, replaces the
/// flag-derived filter.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(derive_level(args))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match args.output_format {
        OutputFormat::Json => registry.with(fmt_layer.json()).try_init(),
        _ => registry.with(fmt_layer).try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|krate| format!("{krate}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `--quiet` shows errors only; each `-v` steps warn → info → debug → trace.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn verbosity_steps_through_levels() {
        let levels: Vec<_> = (0..=4).map(|v| derive_level(&args_with(v, false))).collect();
        assert_eq!(levels, ["warn", "info", "debug", "trace", "trace"]);
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(derive_level(&args_with(0, true)), "error");
        assert_eq!(derive_level(&args_with(3, true)), "error");
    }

    #[test]
    fn directives_cover_every_fabrik_crate() {
        assert_eq!(
            directives("debug"),
            "fabrik=debug,fabrik_core=debug,fabrik_adapters=debug"
        );
    }
}
