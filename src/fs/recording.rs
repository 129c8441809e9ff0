//! Recording [`Driver`] test double.
//!
//! Stub per-path results with the builder methods, hand the driver to the
//! code under test, then assert on [`RecordingDriver::calls`].
//!
//! ```
//! use linkpack::fs::{Call, Driver, Op, RecordingDriver};
//! use std::path::{Path, PathBuf};
//!
//! let driver = RecordingDriver::new().with_file("linkpack.toml", b"targets = []".to_vec());
//! assert_eq!(driver.read_file(Path::new("linkpack.toml")).unwrap(), b"targets = []");
//! assert_eq!(
//!     driver.calls_to(Op::ReadFile),
//!     [Call::ReadFile { path: PathBuf::from("linkpack.toml") }]
//! );
//! ```
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::{Driver, FileInfo, file_name};
use crate::error::DriverError;

/// Driver operation, used to key stubbed errors and filter recorded calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// [`Driver::read_file`]
    ReadFile,
    /// [`Driver::write_file`]
    WriteFile,
    /// [`Driver::mkdir_all`]
    MkdirAll,
    /// [`Driver::read_dir`]
    ReadDir,
    /// [`Driver::stat`]
    Stat,
    /// [`Driver::symlink`]
    Symlink,
}

impl Op {
    /// Operation name as it appears in [`DriverError::op`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReadFile => "read_file",
            Self::WriteFile => "write_file",
            Self::MkdirAll => "mkdir_all",
            Self::ReadDir => "read_dir",
            Self::Stat => "stat",
            Self::Symlink => "symlink",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded driver invocation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `read_file(path)`
    ReadFile {
        /// File read.
        path: PathBuf,
    },
    /// `write_file(path, data, mode)`
    WriteFile {
        /// File written.
        path: PathBuf,
        /// Bytes written.
        data: Vec<u8>,
        /// Requested permission bits.
        mode: u32,
    },
    /// `mkdir_all(path)`
    MkdirAll {
        /// Directory created.
        path: PathBuf,
    },
    /// `read_dir(path)`
    ReadDir {
        /// Directory listed.
        path: PathBuf,
    },
    /// `stat(path)`
    Stat {
        /// Path described.
        path: PathBuf,
    },
    /// `symlink(original, link)`
    Symlink {
        /// Where the link points.
        original: PathBuf,
        /// Where the link is created.
        link: PathBuf,
    },
}

impl Call {
    /// Operation this call invoked.
    #[must_use]
    pub const fn op(&self) -> Op {
        match self {
            Self::ReadFile { .. } => Op::ReadFile,
            Self::WriteFile { .. } => Op::WriteFile,
            Self::MkdirAll { .. } => Op::MkdirAll,
            Self::ReadDir { .. } => Op::ReadDir,
            Self::Stat { .. } => Op::Stat,
            Self::Symlink { .. } => Op::Symlink,
        }
    }
}

/// A [`Driver`] that serves stubbed per-path results and records every call.
///
/// Unstubbed reads (`read_file`, `read_dir`) fail with `NotFound`, an
/// unstubbed `stat` reports a missing path, and unstubbed mutations succeed.
/// A stubbed error wins over a stubbed value for the same path. Symlink
/// errors are keyed by the link path.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashMap<PathBuf, Vec<FileInfo>>,
    stats: HashMap<PathBuf, FileInfo>,
    errors: HashMap<(Op, PathBuf), io::ErrorKind>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingDriver {
    /// Create a driver with nothing stubbed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub the contents returned by `read_file` for `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), data.into());
        self
    }

    /// Stub the entries returned by `read_dir` for `path`.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>, entries: Vec<FileInfo>) -> Self {
        self.dirs.insert(path.into(), entries);
        self
    }

    /// Stub the metadata returned by `stat` for `path`.
    #[must_use]
    pub fn with_stat(mut self, path: impl Into<PathBuf>, info: FileInfo) -> Self {
        self.stats.insert(path.into(), info);
        self
    }

    /// Make `op` on `path` fail with an I/O error of `kind`.
    #[must_use]
    pub fn with_error(mut self, op: Op, path: impl Into<PathBuf>, kind: io::ErrorKind) -> Self {
        self.errors.insert((op, path.into()), kind);
        self
    }

    /// Every recorded call, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded calls to `op`, in invocation order.
    #[must_use]
    pub fn calls_to(&self, op: Op) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.op() == op)
            .collect()
    }

    /// Returns `true` if `op` was invoked at least once.
    #[must_use]
    pub fn has_been_called(&self, op: Op) -> bool {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|call| call.op() == op)
    }

    fn record(&self, call: Call) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    fn stubbed_error(&self, op: Op, path: &Path) -> Result<(), DriverError> {
        match self.errors.get(&(op, path.to_path_buf())) {
            Some(kind) => Err(DriverError::new(
                op.as_str(),
                path,
                io::Error::new(*kind, format!("stubbed {op} failure")),
            )),
            None => Ok(()),
        }
    }
}

impl Driver for RecordingDriver {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, DriverError> {
        self.record(Call::ReadFile {
            path: path.to_path_buf(),
        });
        self.stubbed_error(Op::ReadFile, path)?;
        self.files.get(path).cloned().ok_or_else(|| {
            DriverError::new(
                Op::ReadFile.as_str(),
                path,
                io::Error::from(io::ErrorKind::NotFound),
            )
        })
    }

    fn write_file(&self, path: &Path, data: &[u8], mode: u32) -> Result<(), DriverError> {
        self.record(Call::WriteFile {
            path: path.to_path_buf(),
            data: data.to_vec(),
            mode,
        });
        self.stubbed_error(Op::WriteFile, path)
    }

    fn mkdir_all(&self, path: &Path) -> Result<(), DriverError> {
        self.record(Call::MkdirAll {
            path: path.to_path_buf(),
        });
        self.stubbed_error(Op::MkdirAll, path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, DriverError> {
        self.record(Call::ReadDir {
            path: path.to_path_buf(),
        });
        self.stubbed_error(Op::ReadDir, path)?;
        self.dirs.get(path).cloned().ok_or_else(|| {
            DriverError::new(
                Op::ReadDir.as_str(),
                path,
                io::Error::from(io::ErrorKind::NotFound),
            )
        })
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, DriverError> {
        self.record(Call::Stat {
            path: path.to_path_buf(),
        });
        self.stubbed_error(Op::Stat, path)?;
        Ok(self
            .stats
            .get(path)
            .cloned()
            .unwrap_or_else(|| FileInfo::missing(file_name(path))))
    }

    fn symlink(&self, original: &Path, link: &Path) -> Result<(), DriverError> {
        self.record(Call::Symlink {
            original: original.to_path_buf(),
            link: link.to_path_buf(),
        });
        self.stubbed_error(Op::Symlink, link)
    }
}
