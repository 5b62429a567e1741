//! Component descriptor files.
//!
//! A descriptor is a small YAML document naming one component:
//!
//! ```yaml
//! name: grafana
//! source: https://github.com/helm/charts
//! revision: master
//! path: stable/grafana
//! config:
//!   namespace: monitoring
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Mapping;

use fabrik_core::domain::{Component, ComponentConfig};

use crate::error::{CliError, CliResult};

/// On-disk shape of a component.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDescriptor {
    pub name: String,
    pub source: String,
    #[serde(default)]
    pub revision: Option<String>,
    /// Chart directory inside the repository.
    #[serde(default)]
    pub path: PathBuf,
    #[serde(default)]
    pub config: Option<Mapping>,
}

impl ComponentDescriptor {
    /// Read and parse a descriptor file.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.is_file() {
            return Err(CliError::DescriptorNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| CliError::IoError {
            message: format!("Failed to read '{}'", path.display()),
            source: e,
        })?;
        Self::parse(&text, path)
    }

    /// Parse descriptor text; `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> CliResult<Self> {
        serde_yaml::from_str(text).map_err(|e| CliError::InvalidDescriptor {
            path: origin.to_path_buf(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Build the domain component rooted at `physical_root`.
    pub fn into_component(self, physical_root: &Path) -> CliResult<Component> {
        let mut builder = Component::builder()
            .name(self.name)
            .source(self.source)
            .path(self.path)
            .physical_path(physical_root)
            .config(self.config.map(ComponentConfig::from_mapping).unwrap_or_default());
        if let Some(revision) = self.revision {
            builder = builder.revision(revision);
        }
        builder.build().map_err(|e| CliError::Core(e.into()))
    }
}

/// Directory the component is materialized under: `root` when given, else
/// the descriptor's own directory.
pub fn physical_root(descriptor: &Path, root: Option<&Path>) -> PathBuf {
    if let Some(root) = root {
        return root.to_path_buf();
    }
    match descriptor.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAFANA: &str = "\
name: grafana
source: https://github.com/helm/charts
revision: master
path: stable/grafana
config:
  namespace: monitoring
  adminPassword: changeme
";

    #[test]
    fn parses_full_descriptor() {
        let d = ComponentDescriptor::parse(GRAFANA, Path::new("grafana.yaml")).unwrap();
        assert_eq!(d.name, "grafana");
        assert_eq!(d.revision.as_deref(), Some("master"));
        assert_eq!(d.path, PathBuf::from("stable/grafana"));
        assert_eq!(d.config.map(|c| c.len()), Some(2));
    }

    #[test]
    fn minimal_descriptor_defaults() {
        let d = ComponentDescriptor::parse("name: web\nsource: repo\n", Path::new("w.yaml")).unwrap();
        assert!(d.revision.is_none());
        assert!(d.path.as_os_str().is_empty());
        assert!(d.config.is_none());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err =
            ComponentDescriptor::parse("name: web\nsource: repo\nchart: x\n", Path::new("w.yaml"))
                .unwrap_err();
        assert!(matches!(err, CliError::InvalidDescriptor { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_source_is_rejected() {
        assert!(ComponentDescriptor::parse("name: web\n", Path::new("w.yaml")).is_err());
    }

    #[test]
    fn into_component_carries_every_field() {
        let d = ComponentDescriptor::parse(GRAFANA, Path::new("grafana.yaml")).unwrap();
        let c = d.into_component(Path::new("/srv/infra")).unwrap();

        assert_eq!(c.name(), "grafana");
        assert_eq!(c.revision(), Some("master"));
        assert_eq!(c.physical_path(), Path::new("/srv/infra"));
        assert_eq!(c.config().namespace().unwrap(), Some("monitoring"));
        assert_eq!(
            c.acquired_source_path(),
            PathBuf::from("/srv/infra/helm_repos/grafana")
        );
    }

    #[test]
    fn absolute_chart_path_is_a_user_error() {
        let d = ComponentDescriptor::parse(
            "name: web\nsource: repo\npath: /etc/charts\n",
            Path::new("w.yaml"),
        )
        .unwrap();
        let err = d.into_component(Path::new(".")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn option_like_source_is_a_user_error() {
        let d = ComponentDescriptor::parse(
            "name: web\nsource: --upload-pack=touch /tmp/x\n",
            Path::new("w.yaml"),
        )
        .unwrap();
        let err = d.into_component(Path::new(".")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ComponentDescriptor::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, CliError::DescriptorNotFound { .. }));
    }

    #[test]
    fn physical_root_prefers_explicit_root() {
        assert_eq!(
            physical_root(Path::new("infra/web.yaml"), Some(Path::new("build"))),
            PathBuf::from("build")
        );
        assert_eq!(
            physical_root(Path::new("infra/web.yaml"), None),
            PathBuf::from("infra")
        );
        assert_eq!(physical_root(Path::new("web.yaml"), None), PathBuf::from("."));
    }
}
