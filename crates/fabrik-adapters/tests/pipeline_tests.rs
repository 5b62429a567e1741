//! End-to-end pipeline tests on a real directory tree.
//!
//! The scripted runner stands in for git and docker; everything else uses
//! the production filesystem adapter.

use std::path::Path;
use std::sync::Arc;

use fabrik_adapters::{LocalFilesystem, MemoryFilesystem, ScriptedRunner};
use fabrik_core::application::ApplicationError;
use fabrik_core::prelude::*;

const RENDERED: &str = "\
---
# Source: web/templates/service.yaml
apiVersion: v1
kind: Service
metadata:
  name: web
---
# Source: web/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
";

fn component(root: &Path, chart_path: &str, config: ComponentConfig) -> Component {
    Component::builder()
        .name("web")
        .source("https://example.com/charts.git")
        .path(chart_path)
        .physical_path(root)
        .config(config)
        .build()
        .unwrap()
}

fn pipeline(runner: &ScriptedRunner) -> ComponentPipeline {
    ComponentPipeline::new(
        Arc::new(runner.clone()),
        Arc::new(LocalFilesystem::new()),
        HelmSettings::default(),
    )
}

#[test]
fn acquisition_is_idempotent() {
    let root = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new();
    let pipeline = pipeline(&runner);
    let web = component(root.path(), "", ComponentConfig::new());

    let first = pipeline.install(&web).unwrap();
    std::fs::write(first.join("stale.txt"), "left over").unwrap();
    let second = pipeline.install(&web).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, root.path().join("helm_repos/web"));
    assert!(second.is_dir());
    assert!(!second.join("stale.txt").exists());
    assert_eq!(runner.calls_to("git").len(), 2);
}

#[test]
fn values_file_is_written_into_chart_root() {
    let root = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new();
    runner.respond("docker", CommandOutput::success(RENDERED));
    let pipeline = pipeline(&runner);
    let config = ComponentConfig::new()
        .with("replicaCount", 2)
        .with("image", "nginx:1.27");
    let web = component(root.path(), "charts/web", config);

    let source = pipeline.install(&web).unwrap();
    // Stand in for the checkout that git would have produced.
    std::fs::create_dir_all(source.join("charts/web")).unwrap();

    let out = pipeline.generate(&web).unwrap();
    assert_eq!(out, RENDERED);

    let values_path = source.join("charts/web/overriddenValues.yaml");
    let values: serde_yaml::Mapping =
        serde_yaml::from_str(&std::fs::read_to_string(values_path).unwrap()).unwrap();
    assert_eq!(values.get("replicaCount"), Some(&serde_yaml::Value::from(2)));
    assert_eq!(values.get("image").and_then(|v| v.as_str()), Some("nginx:1.27"));

    let docker = &runner.calls_to("docker")[0];
    let mount = format!("{}:/app/chart", source.join("charts/web").display());
    assert!(docker.has_arg(&mount));
}

#[test]
fn materialize_injects_namespace() {
    let root = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new();
    runner.respond("docker", CommandOutput::success(RENDERED));
    let pipeline = pipeline(&runner);
    let web = component(
        root.path(),
        "",
        ComponentConfig::new().with("namespace", "prod"),
    );

    let out = pipeline.materialize(&web).unwrap();

    let docs: Vec<serde_yaml::Value> = fabrik_core::domain::split_documents(&out)
        .into_iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| serde_yaml::from_str(s).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);
    for doc in docs {
        assert_eq!(doc["metadata"]["namespace"].as_str(), Some("prod"));
    }
}

#[test]
fn missing_chart_directory_is_a_serialization_error() {
    let root = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new();
    let pipeline = pipeline(&runner);
    let web = component(root.path(), "charts/absent", ComponentConfig::new());

    let err = pipeline.materialize(&web).unwrap_err();

    assert!(matches!(
        err,
        FabrikError::Application(ApplicationError::Serialization { .. })
    ));
    assert!(runner.calls_to("docker").is_empty());
}

#[test]
fn git_failure_leaves_no_render() {
    let root = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new();
    runner.respond(
        "git",
        CommandOutput::failure(128, "fatal: could not read Username"),
    );
    let pipeline = pipeline(&runner);

    let err = pipeline
        .materialize(&component(root.path(), "", ComponentConfig::new()))
        .unwrap_err();

    assert!(err.to_string().contains("could not read Username"));
    assert!(runner.calls_to("docker").is_empty());
}

#[test]
fn memory_filesystem_supports_relative_roots() {
    let runner = ScriptedRunner::new();
    let fs = MemoryFilesystem::new();
    let pipeline = ComponentPipeline::new(
        Arc::new(runner.clone()),
        Arc::new(fs.clone()),
        HelmSettings::default(),
    );
    let web = component(Path::new("infra"), "", ComponentConfig::new());

    pipeline.install(&web).unwrap();
    // Relative roots are created as given and anchored at `/` for mounting.
    fs.create_dir_all(Path::new("/infra/helm_repos/web")).unwrap();
    pipeline.generate(&web).unwrap();

    assert!(
        fs.read_file(Path::new("/infra/helm_repos/web/overriddenValues.yaml"))
            .is_some()
    );
    assert!(runner.calls_to("docker")[0].has_arg("/infra/helm_repos/web:/app/chart"));
}
