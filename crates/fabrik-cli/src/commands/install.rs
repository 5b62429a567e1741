//! `fabrik install` — fetch a component's chart source.

use serde_json::json;
use tracing::instrument;

use crate::{
    cli::InstallArgs, config::AppConfig, error::CliResult, output::OutputManager,
};

#[instrument(skip_all, fields(descriptor = %args.descriptor.display()))]
pub fn execute(args: InstallArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let component = super::load_component(&args.descriptor, args.root.as_deref())?;
    let pipeline = super::pipeline(&config);

    let spinner = output.spinner(format!("Cloning {}", component.source()));
    let result = pipeline.install(&component);
    spinner.finish_and_clear();
    let source_path = result?;

    if output.is_json() {
        output.emit_json(&json!({
            "component": component.name(),
            "source_path": source_path,
        }))?;
    } else {
        output.success(&format!(
            "Installed {} into {}",
            component.name(),
            source_path.display()
        ))?;
    }
    Ok(())
}
