//! Media library backed by a pictures directory

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BrowserError, Result};

/// Outcome of a permission query or request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Undetermined,
}

/// Persists downloaded files into the user's media library
pub trait MediaLibrary: Send + Sync {
    /// Current permission, without prompting
    fn permission(&self) -> Permission;

    /// Ask for write access
    fn request_permission(&self) -> Permission;

    /// Copy a staged file into the library, returning its final location
    fn persist(&self, staged: &Path) -> Result<PathBuf>;
}

/// Stores wallpapers in a directory, `<Pictures>/Wallpapers` by default.
///
/// Access counts as granted when the directory exists and a file can be
/// created in it.
/// Requesting access creates the directory.
#[derive(Debug, Clone)]
pub struct PicturesLibrary {
    dir: PathBuf,
}

impl PicturesLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PicturesLibrary { dir: dir.into() }
    }

    /// Whether the current user can create files in the directory.
    /// Mode bits alone say nothing about ownership, so this tries it.
    fn writable(&self) -> bool {
        self.dir.is_dir() && tempfile::NamedTempFile::new_in(&self.dir).is_ok()
    }
}

impl MediaLibrary for PicturesLibrary {
    fn permission(&self) -> Permission {
        if self.writable() {
            Permission::Granted
        } else if self.dir.exists() {
            Permission::Denied
        } else {
            Permission::Undetermined
        }
    }

    fn request_permission(&self) -> Permission {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            tracing::warn!(dir = %self.dir.display(), error = %e, "cannot create media library");
            return Permission::Denied;
        }
        if self.writable() {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }

    fn persist(&self, staged: &Path) -> Result<PathBuf> {
        if self.permission() != Permission::Granted {
            return Err(BrowserError::PermissionDenied);
        }
        let name = staged.file_name().ok_or_else(|| {
            BrowserError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "staged path has no file name",
            ))
        })?;
        let target = self.dir.join(name);
        fs::copy(staged, &target)?;
        Ok(target)
    }
}
