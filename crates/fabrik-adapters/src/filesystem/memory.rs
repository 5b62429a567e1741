//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use fabrik_core::{
    application::{ApplicationError, ports::Filesystem},
    error::FabrikResult,
};

/// In-memory filesystem for testing.
///
/// Relative paths are anchored at `/` by [`Filesystem::absolutize`].
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> FabrikResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> FabrikResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn remove_dir_all(&self, path: &Path) -> FabrikResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?;

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn absolutize(&self, path: &Path) -> FabrikResult<PathBuf> {
        Ok(Path::new("/").join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.yaml"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.yaml"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/a/b.yaml")).as_deref(), Some("x"));
    }

    #[test]
    fn remove_drops_nested_entries_only() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/r/helm_repos/web/charts")).unwrap();
        fs.create_dir_all(Path::new("/r/helm_repos/webapp")).unwrap();
        fs.write_file(Path::new("/r/helm_repos/web/charts/values.yaml"), "")
            .unwrap();

        fs.remove_dir_all(Path::new("/r/helm_repos/web")).unwrap();

        assert!(!fs.exists(Path::new("/r/helm_repos/web")));
        assert!(!fs.exists(Path::new("/r/helm_repos/web/charts")));
        assert!(fs.exists(Path::new("/r/helm_repos/webapp")));
        assert!(fs.list_files().is_empty());
    }

    #[test]
    fn absolutize_anchors_at_root() {
        let fs = MemoryFilesystem::new();
        assert_eq!(
            fs.absolutize(Path::new("infra/helm_repos/web")).unwrap(),
            PathBuf::from("/infra/helm_repos/web")
        );
        assert_eq!(
            fs.absolutize(Path::new("/srv")).unwrap(),
            PathBuf::from("/srv")
        );
    }
}
