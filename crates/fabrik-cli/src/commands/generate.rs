//! `fabrik generate` — render a component into manifests.

use serde_json::json;
use tracing::instrument;

use fabrik_core::domain::count_documents;

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(descriptor = %args.descriptor.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let component = super::load_component(&args.descriptor, args.root.as_deref())?;
    let pipeline = super::pipeline(&config);

    if !args.skip_install {
        let spinner = output.spinner(format!("Cloning {}", component.source()));
        let result = pipeline.install(&component);
        spinner.finish_and_clear();
        result?;
    }

    let spinner = output.spinner(format!("Rendering {}", component.name()));
    let result = pipeline.generate(&component);
    spinner.finish_and_clear();
    let manifests = result?;
    let documents = count_documents(&manifests);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &manifests)
                .with_cli_context(|| format!("Failed to write manifests to '{}'", path.display()))?;
            if output.is_json() {
                output.emit_json(&json!({
                    "component": component.name(),
                    "documents": documents,
                    "output": path,
                }))?;
            } else {
                output.success(&format!(
                    "Wrote {documents} manifest(s) for {} to {}",
                    component.name(),
                    path.display()
                ))?;
            }
        }
        None if output.is_json() => {
            output.emit_json(&json!({
                "component": component.name(),
                "documents": documents,
                "manifests": manifests,
            }))?;
        }
        None => {
            output.emit(&manifests)?;
            output.success(&format!(
                "Rendered {documents} manifest(s) for {}",
                component.name()
            ))?;
        }
    }
    Ok(())
}
