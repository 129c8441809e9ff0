//! Configuration loading through a storage [`Driver`].
use std::path::Path;

use super::{Config, Format, decode};
use crate::error::LinkpackError;
use crate::fs::Driver;

/// Read and decode the configuration at `path`.
///
/// The document format is chosen from the file extension (see
/// [`Format::from_path`]).
///
/// # Errors
///
/// Returns [`LinkpackError::Read`] if the driver cannot read the file and
/// [`LinkpackError::Decode`] if the document is malformed.
pub fn load(driver: &dyn Driver, path: &Path) -> Result<Config, LinkpackError> {
    let bytes = driver.read_file(path).map_err(LinkpackError::Read)?;
    let format = Format::from_path(path);
    tracing::debug!(path = %path.display(), ?format, bytes = bytes.len(), "loading configuration");
    Ok(decode(&bytes, format, path)?)
}
