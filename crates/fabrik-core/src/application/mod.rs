//! Application layer for Fabrik.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SourceService, RenderService, ComponentPipeline)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Settings**: Program names, images and timeouts for the external tools
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export main services
pub use services::{ComponentPipeline, RenderService, SourceService};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem};

pub use error::ApplicationError;
pub use settings::{GitSettings, HelmSettings, ReleaseNameStyle, RenderSettings};
