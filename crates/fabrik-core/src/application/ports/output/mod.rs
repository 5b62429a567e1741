//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `fabrik-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{CommandOutput, CommandSpec};
use crate::error::FabrikResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `fabrik_adapters::filesystem::LocalFilesystem` (production)
/// - `fabrik_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FabrikResult<()>;

    /// Write content to a file, replacing it if it exists.
    fn write_file(&self, path: &Path, content: &str) -> FabrikResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> FabrikResult<()>;

    /// Make `path` absolute without touching the filesystem.
    ///
    /// The path does not need to exist.
    fn absolutize(&self, path: &Path) -> FabrikResult<PathBuf>;
}

/// Port for running external programs (git, docker).
///
/// Implemented by:
/// - `fabrik_adapters::runner::ProcessRunner` (production)
/// - `fabrik_adapters::runner::ScriptedRunner` (testing)
///
/// A non-zero exit is *not* an error at this level; the returned
/// [`CommandOutput`] carries the status and callers decide what it means.
/// Errors are reserved for failing to run the program at all, or for
/// exceeding [`CommandSpec::timeout`].
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> FabrikResult<CommandOutput>;
}
