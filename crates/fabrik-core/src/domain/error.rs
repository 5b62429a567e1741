// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so application errors can carry them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Component Validation
    // ========================================================================
    #[error("Invalid component: {0}")]
    InvalidComponent(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Parent directory traversal not allowed: {path}")]
    ParentTraversalNotAllowed { path: String },

    #[error("config key '{key}' must be a {expected}, found {found}")]
    InvalidConfigValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    // ========================================================================
    // Manifest Normalization
    // ========================================================================
    #[error("document {document}: expected `metadata` to be a mapping, found {found}")]
    MetadataNotMapping { document: usize, found: &'static str },

    #[error("document {document}: failed to encode manifest: {reason}")]
    ManifestEncoding { document: usize, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidComponent(msg) => vec![
                "Check the component description".into(),
                format!("Details: {}", msg),
            ],
            Self::MissingRequiredField { field } => vec![
                format!("Add a '{}' entry to the component description", field),
            ],
            Self::AbsolutePathNotAllowed { .. } | Self::ParentTraversalNotAllowed { .. } => vec![
                "The chart path must be relative to the repository root".into(),
                "Example: path: stable/grafana".into(),
            ],
            Self::InvalidConfigValue { key, expected, .. } => vec![
                format!("Set '{}' to a {} in the component config", key, expected),
                format!("Example: {}: \"my-value\"", key),
            ],
            Self::MetadataNotMapping { document, .. } => vec![
                format!("Rendered document {} has a malformed `metadata` field", document),
                "Check the chart templates that produce this resource".into(),
                "Remove `namespace` from the component config to skip normalization".into(),
            ],
            Self::ManifestEncoding { .. } => vec![
                "The rendered manifest could not be re-encoded as YAML".into(),
                "Please report this issue with the chart that produced it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidComponent(_)
            | Self::MissingRequiredField { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::ParentTraversalNotAllowed { .. }
            | Self::InvalidConfigValue { .. } => ErrorCategory::Validation,
            Self::MetadataNotMapping { .. } => ErrorCategory::Manifest,
            Self::ManifestEncoding { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Manifest,
    Internal,
}
