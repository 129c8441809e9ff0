//! Domain-specific error types for linkpack.
//!
//! Library modules return the typed errors below; command handlers at the
//! CLI boundary convert them to [`anyhow::Error`] with the `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! LinkpackError
//! ├── Read(DriverError)     : configuration bytes could not be fetched
//! ├── Decode(DecodeError)   : configuration document is malformed
//! ├── Resolve(ResolveError) : tree resolution failed
//! └── Driver(DriverError)   : any other storage operation failed
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for loading and resolving a configuration.
#[derive(Error, Debug)]
pub enum LinkpackError {
    /// The configuration file could not be read.
    #[error("failed to read configuration")]
    Read(#[source] DriverError),

    /// The configuration document could not be decoded.
    #[error("failed to decode configuration")]
    Decode(#[from] DecodeError),

    /// The configuration could not be resolved into a tree.
    #[error("failed to resolve configuration")]
    Resolve(#[from] ResolveError),

    /// A storage operation failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Errors raised while decoding a configuration document.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The document is not valid UTF-8.
    #[error("{path} is not valid UTF-8")]
    Utf8 {
        /// Path of the offending document.
        path: PathBuf,
    },

    /// The TOML document is malformed.
    #[error("invalid TOML in {path}")]
    Toml {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying parser error.
        source: toml::de::Error,
    },

    /// The YAML document is malformed.
    #[error("invalid YAML in {path}")]
    Yaml {
        /// Path of the offending document.
        path: PathBuf,
        /// Underlying parser error.
        source: serde_yaml::Error,
    },
}

/// Errors raised while encoding a configuration document.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// TOML serialization failed.
    #[error("failed to encode TOML")]
    Toml(#[from] toml::ser::Error),

    /// YAML serialization failed.
    #[error("failed to encode YAML")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised by the tree builder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Environment substitution referenced a variable that is not set.
    #[error("undefined variable '{var}' in '{input}'")]
    UndefinedVariable {
        /// Name of the missing variable.
        var: String,
        /// The string that was being substituted.
        input: String,
    },

    /// A per-target override cannot name a destination entry.
    #[error("invalid link override for '{target}': {reason}")]
    MalformedOverride {
        /// Target whose override is malformed.
        target: String,
        /// Human-readable explanation.
        reason: String,
    },
}

/// A storage operation failed, with the operation and path for context.
#[derive(Error, Debug)]
#[error("{op} {}: {io}", path.display())]
pub struct DriverError {
    /// Name of the failed operation (e.g. `"read_file"`).
    pub op: &'static str,
    /// Path the operation was applied to.
    pub path: PathBuf,
    /// Underlying I/O error, verbatim. Rendered in the message rather than
    /// exposed as a source, so it is printed once.
    pub io: io::Error,
}

impl DriverError {
    /// Wrap an I/O error with operation and path context.
    #[must_use]
    pub fn new(op: &'static str, path: impl Into<PathBuf>, io: io::Error) -> Self {
        Self {
            op,
            path: path.into(),
            io,
        }
    }

    /// Kind of the underlying I/O error.
    #[must_use]
    pub fn kind(&self) -> io::ErrorKind {
        self.io.kind()
    }
}
