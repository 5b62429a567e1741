//! Flags accepted by every fabrik subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log more on stderr: `-v` stages, `-vv` the git/docker commands run,
    /// `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show more diagnostics (-v, -vv, -vvv)",
        long_help = "Show more diagnostics on stderr:
    (none)  - warnings and errors
    -v      - pipeline stages (acquire, install, render, normalize)
    -vv     - every git and docker command with its arguments
    -vvv    - everything"
    )]
    pub verbose: u8,

    /// Errors only; manifests on stdout are unaffected.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only report errors"
    )]
    pub quiet: bool,

    /// Also set by `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored status and error output"
    )]
    pub no_color: bool,

    /// Settings file; also the target of `fabrik init`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "FABRIK_CONFIG",
        value_name = "FILE",
        help = "Read settings from FILE instead of the user config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How status lines and results are printed"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human when stderr is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Colored status lines and a spinner.
    Human,
    /// Status lines without color.
    Plain,
    /// One JSON object per result; diagnostics as JSON lines.
    Json,
}
