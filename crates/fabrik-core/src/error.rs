//! Unified error handling for Fabrik Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Fabrik Core operations.
///
/// This enum wraps all possible errors that can occur when using fabrik-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum FabrikError {
    /// Errors from the domain layer (invalid components, malformed manifests).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (acquisition, rendering, I/O).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl FabrikError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Manifest => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Message of the wrapped error without the layer prefix.
    ///
    /// Used when one failure becomes the `reason` of another.
    pub fn detail(&self) -> String {
        match self {
            Self::Domain(e) => e.to_string(),
            Self::Application(e) => e.to_string(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    /// An external tool (git, docker, helm) failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type FabrikResult<T> = Result<T, FabrikError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_errors_are_validation_category() {
        let err: FabrikError = DomainError::MetadataNotMapping {
            document: 2,
            found: "sequence",
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn acquisition_failures_are_external() {
        let err: FabrikError = ApplicationError::AcquisitionFailed {
            component: "grafana".into(),
            reason: "network unreachable".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::External);
        assert_eq!(
            err.detail(),
            "Failed to acquire source for 'grafana': network unreachable"
        );
    }
}
