//! `fabrik init` — create a default configuration file.

use std::path::{Path, PathBuf};

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the built-in defaults as TOML to the config location.
///
/// `--config FILE` selects the target; otherwise the platform default.
pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let config_path = global.config.unwrap_or_else(AppConfig::config_path);

    match write_default(&config_path, args.force)? {
        Some(path) => output.success(&format!("Configuration created at {}", path.display()))?,
        None => output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?,
    }
    Ok(())
}

/// Returns `None` when the file exists and `force` is not set.
fn write_default(config_path: &Path, force: bool) -> CliResult<Option<PathBuf>> {
    if config_path.exists() && !force {
        return Ok(None);
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    Ok(Some(config_path.to_path_buf()))
}
