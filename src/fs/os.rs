//! Production [`Driver`] backed by [`std::fs`].
use std::io;
use std::path::Path;

use super::{Driver, FileInfo, file_name};
use crate::error::DriverError;

/// [`Driver`] implementation that delegates to the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsDriver;

impl OsDriver {
    fn describe(path: &Path, meta: &std::fs::Metadata) -> Result<FileInfo, DriverError> {
        let is_symlink = meta.file_type().is_symlink();
        let link_target = if is_symlink {
            Some(std::fs::read_link(path).map_err(|e| DriverError::new("stat", path, e))?)
        } else {
            None
        };
        Ok(FileInfo {
            name: file_name(path),
            exists: true,
            is_dir: meta.is_dir(),
            is_symlink,
            link_target,
            mode: mode_of(meta),
        })
    }
}

impl Driver for OsDriver {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, DriverError> {
        std::fs::read(path).map_err(|e| DriverError::new("read_file", path, e))
    }

    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), DriverError> {
        std::fs::write(path, data).map_err(|e| DriverError::new("write_file", path, e))?;
        set_mode(path, mode).map_err(|e| DriverError::new("write_file", path, e))
    }

    fn mkdir_all(&self, path: &Path) -> Result<(), DriverError> {
        std::fs::create_dir_all(path).map_err(|e| DriverError::new("mkdir_all", path, e))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, DriverError> {
        let wrap = |e| DriverError::new("read_dir", path, e);
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(wrap)? {
            let entry_path = entry.map_err(wrap)?.path();
            let meta = std::fs::symlink_metadata(&entry_path).map_err(wrap)?;
            entries.push(Self::describe(&entry_path, &meta)?);
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, DriverError> {
        match std::fs::symlink_metadata(path) {
            Ok(meta) => Self::describe(path, &meta),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileInfo::missing(file_name(path))),
            Err(e) => Err(DriverError::new("stat", path, e)),
        }
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<(), DriverError> {
        create_symlink(original, link).map_err(|e| DriverError::new("symlink", link, e))
    }
}

#[cfg(unix)]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt as _;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_of(meta: &std::fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o666
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_readonly(mode & 0o222 == 0);
    std::fs::set_permissions(path, perms)
}

#[cfg(unix)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    if original.is_dir() {
        std::os::windows::fs::symlink_dir(original, link)
    } else {
        std::os::windows::fs::symlink_file(original, link)
    }
}
