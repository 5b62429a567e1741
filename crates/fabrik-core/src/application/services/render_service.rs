//! Render Service - runs `helm template` in a container.
//!
//! Workflow:
//! 1. Write the component config as `overriddenValues.yaml` into the chart root
//! 2. Mount only the chart root into the helm image and render it
//! 3. Enforce the configured namespace on the rendered stream, if any

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Filesystem},
        settings::{ReleaseNameStyle, RenderSettings},
    },
    domain::{
        CommandSpec, Component, DomainValidator as validator, VALUES_FILE_NAME, count_documents,
        inject_namespace,
    },
    error::{FabrikError, FabrikResult},
};

/// Renders an acquired chart into a manifest stream.
pub struct RenderService {
    runner: Arc<dyn CommandRunner>,
    filesystem: Arc<dyn Filesystem>,
    settings: RenderSettings,
}

impl RenderService {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        filesystem: Arc<dyn Filesystem>,
        settings: RenderSettings,
    ) -> Self {
        Self {
            runner,
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `component` from its previously acquired source.
    ///
    /// Without a configured namespace the renderer's stdout is returned
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::Serialization`] if the values file cannot be produced
    /// - [`ApplicationError::RenderProcessFailed`] if the container cannot be run
    ///   or exits non-zero
    /// - [`ApplicationError::NormalizationFailed`] if namespace injection fails
    #[instrument(skip_all, fields(component = %component.name()))]
    pub fn render(&self, component: &Component) -> FabrikResult<String> {
        validator::validate_component(component)?;

        let name = component.name();
        info!(component = %name, chart = %component.path(), "rendering component");

        let values = component
            .config()
            .to_values_yaml()
            .map_err(|e| serialization(name, e.to_string()))?;

        let chart_root = self.chart_root(component)?;
        let values_path = chart_root.join(VALUES_FILE_NAME);
        self.filesystem
            .write_file(&values_path, &values)
            .map_err(|e| serialization(name, e.detail()))?;
        debug!(path = %values_path.display(), keys = component.config().len(), "values written");

        let spec = self.render_command(&chart_root, component.release_name()?);
        debug!(command = %spec, "invoking renderer");

        let output = self
            .runner
            .run(&spec)
            .map_err(|e| render_failed(name, e.detail()))?;
        if !output.is_success() {
            return Err(render_failed(name, output.failure_summary()));
        }

        match component.config().namespace()? {
            Some(namespace) => {
                let normalized = inject_namespace(&output.stdout, namespace).map_err(|source| {
                    ApplicationError::NormalizationFailed {
                        component: name.to_string(),
                        source,
                    }
                })?;
                debug!(
                    namespace,
                    documents = count_documents(&normalized),
                    "namespace injected"
                );
                Ok(normalized)
            }
            None => Ok(output.stdout),
        }
    }

    /// Absolute chart directory: the acquired source joined with the chart path.
    pub fn chart_root(&self, component: &Component) -> FabrikResult<PathBuf> {
        let source = self
            .filesystem
            .absolutize(&component.acquired_source_path())?;
        Ok(component.path().resolve(&source))
    }

    /// The containerized `helm template` invocation for a chart root.
    pub fn render_command(&self, chart_root: &Path, release: &str) -> CommandSpec {
        let settings = &self.settings;
        let mount = settings.mount_point.trim_end_matches('/');
        let values = format!("{mount}/{VALUES_FILE_NAME}");

        let spec = CommandSpec::new(&settings.docker_program)
            .args(["run", "--rm", "-v"])
            .arg(format!("{}:{mount}", chart_root.display()))
            .arg(&settings.image)
            .arg("template");

        let spec = match settings.release_name_style {
            ReleaseNameStyle::Positional => spec.args([release, mount, "--values", values.as_str()]),
            ReleaseNameStyle::Flag => {
                spec.args([mount, "--values", values.as_str(), "--name", release])
            }
        };

        spec.timeout(settings.timeout)
    }
}

fn serialization(component: &str, reason: String) -> FabrikError {
    ApplicationError::Serialization {
        component: component.to_string(),
        reason,
    }
    .into()
}

fn render_failed(component: &str, reason: String) -> FabrikError {
    ApplicationError::RenderProcessFailed {
        component: component.to_string(),
        reason,
    }
    .into()
}
