// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Fabrik.
//!
//! This module contains pure logic: the component model, the on-disk layout
//! convention, descriptions of external commands and the namespace
//! normalization of manifest streams. Executing commands and touching the
//! filesystem is handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or process calls
//! - **Few external crates**: std + thiserror + serde_yaml for dynamic documents
//! - **Immutable entities**: All domain objects are Clone + PartialEq
pub mod entities;
pub mod error;
pub mod manifest;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    command::{CommandOutput, CommandSpec},
    common::RelativePath,
    component::{
        Component, ComponentBuilder, ComponentConfig, HELM_REPOS_DIR, NAMESPACE_KEY,
        RELEASE_NAME_KEY, VALUES_FILE_NAME, acquired_source_path,
    },
};

pub use error::{DomainError, ErrorCategory};

pub use manifest::{count_documents, inject_namespace, split_documents};

pub use validation::DomainValidator;
