use super::DomainError;
use std::fmt;
use std::path::{Component as PathComponent, Path, PathBuf};

/// A filesystem path guaranteed to stay beneath the directory it is joined to.
///
/// Invariant: never absolute and never contains `..`. Enforced at construction.
/// The empty path is allowed and means "the directory itself".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| matches!(c, PathComponent::ParentDir)) {
            return Err(DomainError::ParentTraversalNotAllowed {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    /// Resolve this path beneath `base`.
    ///
    /// The empty path resolves to `base` itself.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        if self.is_empty() {
            base.to_path_buf()
        } else {
            base.join(&self.0)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl TryFrom<&str> for RelativePath {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::try_new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}
