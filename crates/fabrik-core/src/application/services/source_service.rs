//! Source Service - fetches a component's template source.
//!
//! Acquisition is destructive: whatever sits at the acquired source path is
//! removed before a fresh shallow clone is taken, so repeated calls converge
//! on the same tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
        settings::GitSettings,
    },
    domain::{CommandSpec, Component, DomainValidator as validator},
    error::{FabrikError, FabrikResult},
};

/// Acquires template sources into `<physical>/helm_repos/<name>`.
pub struct SourceService {
    runner: Arc<dyn CommandRunner>,
    filesystem: Arc<dyn Filesystem>,
    settings: GitSettings,
}

impl SourceService {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        filesystem: Arc<dyn Filesystem>,
        settings: GitSettings,
    ) -> Self {
        Self {
            runner,
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &GitSettings {
        &self.settings
    }

    /// Replace the component's acquired source with a fresh shallow clone.
    ///
    /// Returns the acquired source path.
    ///
    /// # Errors
    ///
    /// Every failure after validation, from removing the old tree to a
    /// non-zero `git` exit, is reported as
    /// [`ApplicationError::AcquisitionFailed`].
    #[instrument(skip_all, fields(component = %component.name()))]
    pub fn acquire(&self, component: &Component) -> FabrikResult<PathBuf> {
        validator::validate_component(component)?;

        let destination = component.acquired_source_path();
        info!(
            repository = %component.source(),
            component = %component.name(),
            destination = %destination.display(),
            "acquiring source"
        );

        let failed = |reason: String| -> FabrikError {
            ApplicationError::AcquisitionFailed {
                component: component.name().to_string(),
                reason,
            }
            .into()
        };

        self.prepare_destination(&destination)
            .map_err(|e| failed(e.detail()))?;

        let spec = self.clone_command(component, &destination);
        debug!(command = %spec, "fetching source");

        let output = self.runner.run(&spec).map_err(|e| failed(e.detail()))?;
        if !output.is_success() {
            return Err(failed(output.failure_summary()));
        }

        Ok(destination)
    }

    /// The `git clone` invocation for `component`.
    pub fn clone_command(&self, component: &Component, destination: &Path) -> CommandSpec {
        let spec = CommandSpec::new(&self.settings.program)
            .args(["clone", component.source()])
            .arg(destination.display().to_string())
            .args(["--depth", "1"])
            .timeout(self.settings.timeout);

        match component.revision() {
            Some(revision) => spec.args(["--branch", revision]),
            None => spec,
        }
    }

    fn prepare_destination(&self, destination: &Path) -> FabrikResult<()> {
        if self.filesystem.exists(destination) {
            debug!(path = %destination.display(), "removing previous source");
            self.filesystem.remove_dir_all(destination)?;
        }
        self.filesystem.create_dir_all(destination)
    }
}
