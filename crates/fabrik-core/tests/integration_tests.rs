//! Integration tests for fabrik-core through its public API.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fabrik_core::application::ApplicationError;
use fabrik_core::domain::{count_documents, split_documents};
use fabrik_core::prelude::*;

/// Filesystem fake that only tracks which directories and files exist.
#[derive(Default)]
struct TrackingFs {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl Filesystem for TrackingFs {
    fn create_dir_all(&self, path: &Path) -> FabrikResult<()> {
        self.dirs.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> FabrikResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> FabrikResult<()> {
        self.dirs.lock().unwrap().retain(|d| !d.starts_with(path));
        self.files.lock().unwrap().retain(|f, _| !f.starts_with(path));
        Ok(())
    }

    fn absolutize(&self, path: &Path) -> FabrikResult<PathBuf> {
        Ok(Path::new("/").join(path))
    }
}

/// Runner that answers `git` with success and `docker` with a fixed stream.
struct FakeHelm {
    stream: &'static str,
    calls: Mutex<Vec<CommandSpec>>,
}

impl CommandRunner for FakeHelm {
    fn run(&self, spec: &CommandSpec) -> FabrikResult<CommandOutput> {
        self.calls.lock().unwrap().push(spec.clone());
        match spec.program.as_str() {
            "git" => Ok(CommandOutput::success("")),
            "docker" => Ok(CommandOutput::success(self.stream)),
            other => Err(ApplicationError::CommandNotFound {
                program: other.to_string(),
            }
            .into()),
        }
    }
}

const HELM_OUTPUT: &str = "\
---
# Source: grafana/templates/serviceaccount.yaml
apiVersion: v1
kind: ServiceAccount
metadata:
  name: grafana
  labels:
    app: grafana
---
# Source: grafana/templates/tests/empty.yaml

---
# Source: grafana/templates/clusterrole.yaml
kind: ClusterRoleList
items: []
---
# Source: grafana/templates/deployment.yaml
apiVersion: apps/v1
kind: Deployment
metadata:
  name: grafana
  namespace: default
spec:
  replicas: 1
";

fn grafana(config: ComponentConfig) -> Component {
    Component::builder()
        .name("grafana")
        .source("https://github.com/helm/charts")
        .path("stable/grafana")
        .physical_path("/work/infra")
        .config(config)
        .build()
        .unwrap()
}

fn pipeline(stream: &'static str) -> (ComponentPipeline, Arc<FakeHelm>, Arc<TrackingFs>) {
    let runner = Arc::new(FakeHelm {
        stream,
        calls: Mutex::new(Vec::new()),
    });
    let fs = Arc::new(TrackingFs::default());
    let pipeline = ComponentPipeline::new(runner.clone(), fs.clone(), HelmSettings::default());
    (pipeline, runner, fs)
}

#[test]
fn helm_output_is_namespaced_end_to_end() {
    let (pipeline, runner, fs) = pipeline(HELM_OUTPUT);
    let config = ComponentConfig::new()
        .with("namespace", "monitoring")
        .with("adminPassword", "changeme");

    let out = pipeline.materialize(&grafana(config)).unwrap();

    assert_eq!(count_documents(&out), 3);
    let namespaced = out.matches("namespace: monitoring").count();
    assert_eq!(namespaced, 2, "ServiceAccount and Deployment carry metadata");
    assert!(!out.contains("namespace: default"));
    assert!(out.contains("items: []"));

    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].program, "git");
    assert_eq!(calls[1].program, "docker");

    let values = fs.files.lock().unwrap();
    let written = values
        .get(Path::new(
            "/work/infra/helm_repos/grafana/stable/grafana/overriddenValues.yaml",
        ))
        .unwrap();
    assert!(written.contains("adminPassword: changeme"));
}

#[test]
fn raw_stream_is_untouched_without_namespace() {
    let (pipeline, _, _) = pipeline(HELM_OUTPUT);
    let out = pipeline.materialize(&grafana(ComponentConfig::new())).unwrap();
    assert_eq!(out, HELM_OUTPUT);
}

#[test]
fn normalized_output_is_stable_under_renormalization() {
    let once = inject_namespace(HELM_OUTPUT, "ops").unwrap();
    let twice = inject_namespace(&once, "ops").unwrap();
    assert_eq!(once, twice);
    assert_eq!(split_documents(&once).len(), count_documents(&once) + 1);
}

#[test]
fn distinct_components_do_not_share_sources() {
    let (pipeline, _, fs) = pipeline("");
    let redis = Component::builder()
        .name("redis")
        .source("https://example.com/redis.git")
        .physical_path("/work/infra")
        .build()
        .unwrap();

    pipeline.install(&grafana(ComponentConfig::new())).unwrap();
    pipeline.install(&redis).unwrap();
    pipeline.install(&redis).unwrap();

    let dirs = fs.dirs.lock().unwrap();
    assert!(dirs.contains(Path::new("/work/infra/helm_repos/grafana")));
    assert!(dirs.contains(Path::new("/work/infra/helm_repos/redis")));
}
