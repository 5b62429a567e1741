//! The `Component` aggregate and its on-disk layout.
//!
//! A `Component` is the read-only view of one helm backed unit of deployable
//! configuration: where its chart lives, where it is materialized on disk, and
//! the values it is rendered with. The component tree that owns it is not
//! modelled here.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::domain::{entities::common::RelativePath, error::DomainError, manifest::node_kind};

/// Directory, below a component's physical path, that holds acquired sources.
pub const HELM_REPOS_DIR: &str = "helm_repos";

/// Values file written into the chart root before rendering.
pub const VALUES_FILE_NAME: &str = "overriddenValues.yaml";

/// Config key overriding the release name passed to the renderer.
pub const RELEASE_NAME_KEY: &str = "name";

/// Config key naming the namespace injected into rendered manifests.
pub const NAMESPACE_KEY: &str = "namespace";

/// Where a component's template source is acquired to.
///
/// `<physical_root>/helm_repos/<component_name>`; one directory per name.
pub fn acquired_source_path(physical_root: &Path, component_name: &str) -> PathBuf {
    physical_root.join(HELM_REPOS_DIR).join(component_name)
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Arbitrary key/value configuration for a component.
///
/// Keys keep their insertion order so the values file mirrors the
/// description it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentConfig(Mapping);

impl ComponentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(Value::String(key.into()), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    /// The release name override, if configured.
    pub fn release_name(&self) -> Result<Option<&str>, DomainError> {
        self.string_value(RELEASE_NAME_KEY)
    }

    /// The target namespace, if configured.
    pub fn namespace(&self) -> Result<Option<&str>, DomainError> {
        self.string_value(NAMESPACE_KEY)
    }

    /// Serialize the whole mapping as a helm values document.
    pub fn to_values_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }

    // A null value counts as absent.
    fn string_value(&self, key: &str) -> Result<Option<&str>, DomainError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(DomainError::InvalidConfigValue {
                key: key.to_string(),
                expected: "string",
                found: node_kind(other),
            }),
        }
    }
}

impl From<Mapping> for ComponentConfig {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

// ── Aggregate ─────────────────────────────────────────────────────────────────

/// A validated helm component.
///
/// Every field is guaranteed consistent on construction:
/// - `name` is usable as a single directory name
/// - `source` is non-empty
/// - `path` stays inside the acquired repository
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    source: String,
    revision: Option<String>,
    path: RelativePath,
    physical_path: PathBuf,
    config: ComponentConfig,
}

impl Component {
    /// Start building a new `Component`.
    pub fn builder() -> ComponentBuilder {
        ComponentBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository reference the template source is fetched from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Branch or tag to fetch; the remote default branch when `None`.
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Chart location relative to the repository root.
    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn physical_path(&self) -> &Path {
        &self.physical_path
    }

    pub fn config(&self) -> &ComponentConfig {
        &self.config
    }

    pub fn acquired_source_path(&self) -> PathBuf {
        acquired_source_path(&self.physical_path, &self.name)
    }

    /// Release name handed to the renderer: the `name` override or the
    /// component's own name.
    pub fn release_name(&self) -> Result<&str, DomainError> {
        Ok(self.config.release_name()?.unwrap_or(&self.name))
    }

    /// Validate this component's internal consistency.
    ///
    /// Called automatically by the builder.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;

        if self.source.trim().is_empty() {
            return Err(DomainError::MissingRequiredField { field: "source" });
        }
        // Both end up as git arguments; a leading dash would read as an option.
        if self.source.starts_with('-') {
            return Err(DomainError::InvalidComponent(format!(
                "source '{}' cannot start with '-'",
                self.source
            )));
        }
        if let Some(revision) = self.revision.as_deref().filter(|r| r.starts_with('-')) {
            return Err(DomainError::InvalidComponent(format!(
                "revision '{revision}' cannot start with '-'"
            )));
        }

        // Surface a wrongly typed reserved key before any I/O happens.
        self.config.release_name()?;
        self.config.namespace()?;

        Ok(())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.name, self.source)?;
        if let Some(rev) = &self.revision {
            write!(f, "@{rev}")?;
        }
        write!(f, ")")
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::MissingRequiredField { field: "name" });
    }
    if name == "." || name == ".." {
        return Err(DomainError::InvalidComponent(format!(
            "name '{name}' is reserved"
        )));
    }
    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(DomainError::InvalidComponent(format!(
            "name '{name}' cannot contain path separators"
        )));
    }
    Ok(())
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`Component`].
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    name: Option<String>,
    source: Option<String>,
    revision: Option<String>,
    path: PathBuf,
    physical_path: Option<PathBuf>,
    config: ComponentConfig,
}

impl ComponentBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Chart path inside the repository. Defaults to the repository root.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn physical_path(mut self, physical_path: impl Into<PathBuf>) -> Self {
        self.physical_path = Some(physical_path.into());
        self
    }

    pub fn config(mut self, config: ComponentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Component, DomainError> {
        let component = Component {
            name: self
                .name
                .ok_or(DomainError::MissingRequiredField { field: "name" })?,
            source: self
                .source
                .ok_or(DomainError::MissingRequiredField { field: "source" })?,
            revision: self.revision.filter(|r| !r.trim().is_empty()),
            path: RelativePath::try_new(self.path)?,
            physical_path: self
                .physical_path
                .ok_or(DomainError::MissingRequiredField {
                    field: "physical_path",
                })?,
            config: self.config,
        };

        component.validate()?;
        Ok(component)
    }
}
