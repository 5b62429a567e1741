//! Component Pipeline - the per-component acquire then render flow.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ports::{CommandRunner, Filesystem},
        services::{RenderService, SourceService},
        settings::HelmSettings,
    },
    domain::Component,
    error::FabrikResult,
};

/// Wires [`SourceService`] and [`RenderService`] over shared adapters.
pub struct ComponentPipeline {
    source: SourceService,
    render: RenderService,
}

impl ComponentPipeline {
    /// Create a pipeline with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use fabrik_core::prelude::*;
    ///
    /// # fn build(runner: Arc<dyn CommandRunner>, fs: Arc<dyn Filesystem>) {
    /// let pipeline = ComponentPipeline::new(runner, fs, HelmSettings::default());
    /// # }
    /// ```
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        filesystem: Arc<dyn Filesystem>,
        settings: HelmSettings,
    ) -> Self {
        Self {
            source: SourceService::new(runner.clone(), filesystem.clone(), settings.git),
            render: RenderService::new(runner, filesystem, settings.render),
        }
    }

    pub fn source(&self) -> &SourceService {
        &self.source
    }

    pub fn renderer(&self) -> &RenderService {
        &self.render
    }

    /// Acquire the component's source only.
    pub fn install(&self, component: &Component) -> FabrikResult<PathBuf> {
        self.source.acquire(component)
    }

    /// Render from an already acquired source.
    pub fn generate(&self, component: &Component) -> FabrikResult<String> {
        self.render.render(component)
    }

    /// Acquire, then render. Nothing is rendered if acquisition fails.
    #[instrument(skip_all, fields(component = %component.name()))]
    pub fn materialize(&self, component: &Component) -> FabrikResult<String> {
        let path = self.source.acquire(component)?;
        let manifests = self.render.render(component)?;
        info!(source = %path.display(), bytes = manifests.len(), "component materialized");
        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockCommandRunner, MockFilesystem},
    };
    use crate::domain::{CommandOutput, CommandSpec, ComponentConfig};
    use crate::error::FabrikError;

    fn component() -> Component {
        Component::builder()
            .name("redis")
            .source("https://example.com/redis.git")
            .physical_path("/srv/stack")
            .config(ComponentConfig::new().with("namespace", "cache"))
            .build()
            .unwrap()
    }

    fn accepting_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_absolutize().returning(|p| Ok(p.to_path_buf()));
        fs.expect_write_file().returning(|_, _| Ok(()));
        fs
    }

    #[test]
    fn materialize_acquires_before_rendering() {
        let mut seq = mockall::Sequence::new();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec: &CommandSpec| spec.program == "git")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::success("")));
        runner
            .expect_run()
            .withf(|spec: &CommandSpec| spec.program == "docker")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CommandOutput::success("kind: Secret\nmetadata:\n  name: auth\n")));

        let pipeline =
            ComponentPipeline::new(Arc::new(runner), Arc::new(accepting_fs()), HelmSettings::default());
        let out = pipeline.materialize(&component()).unwrap();

        assert!(out.contains("namespace: cache"));
    }

    #[test]
    fn failed_acquisition_skips_rendering() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec: &CommandSpec| spec.program == "git")
            .times(1)
            .returning(|_| Ok(CommandOutput::failure(128, "fatal: unable to access")));

        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().never();

        let pipeline = ComponentPipeline::new(Arc::new(runner), Arc::new(fs), HelmSettings::default());
        let err = pipeline.materialize(&component()).unwrap_err();

        assert!(matches!(
            err,
            FabrikError::Application(ApplicationError::AcquisitionFailed { .. })
        ));
    }

    #[test]
    fn settings_reach_both_services() {
        let mut settings = HelmSettings::default();
        settings.git.program = "/opt/git/bin/git".into();
        settings.render.image = "registry.local/helm:3.14".into();

        let pipeline = ComponentPipeline::new(
            Arc::new(MockCommandRunner::new()),
            Arc::new(MockFilesystem::new()),
            settings,
        );

        let clone = pipeline
            .source()
            .clone_command(&component(), Path::new("/tmp/redis"));
        assert_eq!(clone.program, "/opt/git/bin/git");

        let render = pipeline.renderer().render_command(Path::new("/tmp/redis"), "redis");
        assert!(render.has_arg("registry.local/helm:3.14"));
    }
}
