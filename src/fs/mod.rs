//! Storage driver abstraction for dependency injection.
//!
//! Provides the [`Driver`] trait so that configuration loading and link
//! application can be unit-tested without touching the real filesystem.
//! Production code uses [`OsDriver`]; tests use [`RecordingDriver`], which
//! serves stubbed per-path results and records every call.
mod os;
pub mod recording;

pub use os::OsDriver;
pub use recording::{Call, Op, RecordingDriver};

use std::path::{Path, PathBuf};

use crate::error::DriverError;

/// Metadata returned by [`Driver::stat`] and [`Driver::read_dir`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// Final path component.
    pub name: String,
    /// Whether anything exists at the path (a dangling symlink counts).
    pub exists: bool,
    /// Whether the entry itself is a directory. Symlinks are not followed.
    pub is_dir: bool,
    /// Whether the entry is a symbolic link.
    pub is_symlink: bool,
    /// Where the symlink points, for symlinks.
    pub link_target: Option<PathBuf>,
    /// Permission bits.
    pub mode: u32,
}

impl FileInfo {
    /// Metadata for a path where nothing exists.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Metadata for a regular file.
    #[must_use]
    pub fn file(name: impl Into<String>, mode: u32) -> Self {
        Self {
            name: name.into(),
            exists: true,
            mode,
            ..Self::default()
        }
    }

    /// Metadata for a directory.
    #[must_use]
    pub fn dir(name: impl Into<String>, mode: u32) -> Self {
        Self {
            name: name.into(),
            exists: true,
            is_dir: true,
            mode,
            ..Self::default()
        }
    }

    /// Metadata for a symlink pointing at `target`.
    #[must_use]
    pub fn symlink(name: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            exists: true,
            is_symlink: true,
            link_target: Some(target.into()),
            mode: 0o777,
            ..Self::default()
        }
    }
}

/// Filesystem capabilities needed to load configurations and apply trees.
///
/// Every failure carries the operation name and path in its
/// [`DriverError`].
#[cfg_attr(test, mockall::automock)]
pub trait Driver {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, DriverError>;

    /// Write `data` to `path`, creating or truncating it, with permission `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), DriverError>;

    /// Create `path` and every missing parent directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn mkdir_all(&self, path: &Path) -> Result<(), DriverError>;

    /// List the entries of the directory at `path`, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be read as a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, DriverError>;

    /// Describe `path` without following a final symlink.
    ///
    /// A missing path is reported through [`FileInfo::exists`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata exists but cannot be read.
    fn stat(&self, path: &Path) -> Result<FileInfo, DriverError>;

    /// Create a symbolic link at `link` pointing to `original`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    fn symlink(&self, original: &Path, link: &Path) -> Result<(), DriverError>;
}

/// Final component of `path` as a `String`, or an empty string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn missing_info_does_not_exist() {
        let info = FileInfo::missing("x");
        assert!(!info.exists);
        assert!(!info.is_symlink);
        assert_eq!(info.name, "x");
    }

    #[test]
    fn symlink_info_carries_target() {
        let info = FileInfo::symlink("vimrc", "/dotfiles/vimrc");
        assert!(info.exists);
        assert!(info.is_symlink);
        assert!(!info.is_dir);
        assert_eq!(info.link_target, Some(PathBuf::from("/dotfiles/vimrc")));
    }

    #[test]
    fn file_name_of_root_is_empty() {
        assert_eq!(file_name(Path::new("/")), "");
        assert_eq!(file_name(Path::new("/a/b.toml")), "b.toml");
    }
}
