//! Package configuration model and document codecs.
//!
//! A configuration is a recursive declaration: a list of `targets` (package
//! names under the source root) plus per-target `options` that may rename
//! the link, move it under another base directory, or declare nested
//! targets of their own.
//!
//! ```toml
//! baseDir = "${HOME}"
//! targets = [".vimrc", "config"]
//!
//! [options.config]
//! link = ".config"
//! targets = ["nvim", "git"]
//! ```
pub mod loader;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DecodeError, EncodeError};

/// A package declaration, decoded from a user-authored document.
///
/// `options` entries whose key is not listed in `targets` are inert: they
/// never produce a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Destination root for this level's links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<String>,
    /// Link-name override. Only meaningful inside `options`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Package names at this level.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
    /// Per-target overrides and nested declarations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, Config>,
}

impl Config {
    /// Declaration listing `targets` with no overrides.
    #[must_use]
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Override carrying only a link rename.
    #[must_use]
    pub fn link_override(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Set the destination root.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Add a per-target override.
    #[must_use]
    pub fn option(mut self, name: impl Into<String>, option: Self) -> Self {
        self.options.insert(name.into(), option);
        self
    }
}

/// Document encoding of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// TOML, the default.
    #[default]
    Toml,
    /// YAML, selected by a `.yml` or `.yaml` extension.
    Yaml,
}

impl Format {
    /// Pick the format from the file extension, defaulting to TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

/// Decode a configuration document. `path` is only used for error context.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the bytes are not valid UTF-8 (TOML) or the
/// document does not match the configuration shape.
pub fn decode(bytes: &[u8], format: Format, path: &Path) -> Result<Config, DecodeError> {
    match format {
        Format::Toml => {
            let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::Utf8 {
                path: path.to_path_buf(),
            })?;
            toml::from_str(text).map_err(|source| DecodeError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
        Format::Yaml => serde_yaml::from_slice(bytes).map_err(|source| DecodeError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Encode a configuration document.
///
/// # Errors
///
/// Returns an [`EncodeError`] if serialization fails.
pub fn encode(config: &Config, format: Format) -> Result<String, EncodeError> {
    match format {
        Format::Toml => Ok(toml::to_string(config)?),
        Format::Yaml => Ok(serde_yaml::to_string(config)?),
    }
}
