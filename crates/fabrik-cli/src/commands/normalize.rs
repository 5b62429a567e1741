//! `fabrik normalize` — force a namespace onto a manifest stream.

use std::io::Read as _;
use std::path::Path;

use fabrik_core::domain::inject_namespace;

use crate::{
    cli::NormalizeArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: NormalizeArgs, output: OutputManager) -> CliResult<()> {
    let stream = read_input(args.input.as_deref())?;
    let normalized =
        inject_namespace(&stream, &args.namespace).map_err(|e| CliError::Core(e.into()))?;
    output.emit(&normalized)?;
    Ok(())
}

/// Read the whole stream from `path`, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            if !p.is_file() {
                return Err(CliError::InvalidInput {
                    message: format!("'{}' is not a readable file", p.display()),
                    source: None,
                });
            }
            std::fs::read_to_string(p)
                .with_cli_context(|| format!("Failed to read '{}'", p.display()))
        }
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .with_cli_context(|| "Failed to read manifests from stdin")?;
            Ok(buf)
        }
    }
}
