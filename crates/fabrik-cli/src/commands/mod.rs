//! Command handlers, one module per subcommand.

use std::path::Path;
use std::sync::Arc;

use fabrik_adapters::{LocalFilesystem, ProcessRunner};
use fabrik_core::application::ComponentPipeline;
use fabrik_core::domain::Component;

use crate::config::AppConfig;
use crate::descriptor::{ComponentDescriptor, physical_root};
use crate::error::CliResult;

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod install;
pub mod normalize;

/// Pipeline wired to the real `git`/`docker` processes and local disk.
fn pipeline(config: &AppConfig) -> ComponentPipeline {
    ComponentPipeline::new(
        Arc::new(ProcessRunner::new()),
        Arc::new(LocalFilesystem::new()),
        config.helm_settings(),
    )
}

fn load_component(descriptor: &Path, root: Option<&Path>) -> CliResult<Component> {
    let parsed = ComponentDescriptor::load(descriptor)?;
    parsed.into_component(&physical_root(descriptor, root))
}
