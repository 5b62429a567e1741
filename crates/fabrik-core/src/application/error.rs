//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Preparing the destination or fetching the template source failed.
    #[error("Failed to acquire source for '{component}': {reason}")]
    AcquisitionFailed { component: String, reason: String },

    /// The values document could not be produced or written.
    #[error("Failed to write values for '{component}': {reason}")]
    Serialization { component: String, reason: String },

    /// The containerized renderer could not be launched or exited non-zero.
    #[error("Rendering '{component}' failed: {reason}")]
    RenderProcessFailed { component: String, reason: String },

    /// The rendered stream could not be normalized.
    #[error("Failed to normalize manifests of '{component}'")]
    NormalizationFailed {
        component: String,
        #[source]
        source: DomainError,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The program to run is not installed or not on `PATH`.
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// The program exists but could not be started or waited on.
    #[error("Failed to run {program}: {reason}")]
    CommandLaunchFailed { program: String, reason: String },

    /// The process wrote something other than UTF-8 text to stdout.
    #[error("{program} produced output that is not valid UTF-8: {reason}")]
    InvalidOutput { program: String, reason: String },

    /// The process outlived its timeout and was killed.
    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    /// Shared state of an adapter was poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AcquisitionFailed { reason, .. } => vec![
                format!("Acquisition failed: {}", reason),
                "Check that the repository URL and revision exist".into(),
                "Check your network connection and git credentials".into(),
            ],
            Self::Serialization { .. } => vec![
                "Check that the chart path exists inside the repository".into(),
                "Run `fabrik install` first if the source was never acquired".into(),
            ],
            Self::RenderProcessFailed { .. } => vec![
                "Check that docker is running and can pull the helm image".into(),
                "Inspect the chart with `helm lint` for template errors".into(),
            ],
            Self::NormalizationFailed { source, .. } => source.suggestions(),
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::CommandNotFound { program } => vec![
                format!("Install '{}' or add it to your PATH", program),
                "Or point fabrik at it via the config file".into(),
            ],
            Self::InvalidOutput { program, .. } => vec![
                format!("'{}' must print UTF-8 text", program),
                "Check the chart templates for binary content".into(),
            ],
            Self::CommandTimedOut { .. } => vec![
                "Raise the timeout in the config file (0 disables it)".into(),
                "Try again in a moment".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AcquisitionFailed { .. }
            | Self::RenderProcessFailed { .. }
            | Self::CommandNotFound { .. }
            | Self::CommandLaunchFailed { .. }
            | Self::InvalidOutput { .. }
            | Self::CommandTimedOut { .. } => ErrorCategory::External,
            Self::NormalizationFailed { .. } => ErrorCategory::Validation,
            Self::Serialization { .. } | Self::FilesystemError { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
        }
    }
}
