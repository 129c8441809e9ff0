//! Command: write a starter configuration from the source directory listing.
use anyhow::{Context as _, Result};

use super::Workspace;
use crate::cli::InitOpts;
use crate::config::{self, Config, Format};
use crate::error::LinkpackError;
use crate::fs::{Driver, file_name};
use crate::logging::Logger;

/// Permission bits of the written configuration file.
const CONFIG_MODE: u32 = 0o644;

/// Run the init command and return the configuration that was written.
///
/// Every visible entry of the source root becomes a target. Hidden entries
/// and the configuration file itself are left out.
///
/// # Errors
///
/// Returns an error if the configuration already exists and `--force` was
/// not given, or if listing the source root or writing the file fails.
pub fn run(
    driver: &dyn Driver,
    ws: &Workspace,
    opts: &InitOpts,
    log: &Logger,
) -> Result<Config> {
    let existing = driver.stat(&ws.config_path).map_err(LinkpackError::Driver)?;
    if existing.exists && !opts.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            ws.config_path.display()
        );
    }

    let own_name = file_name(&ws.config_path);
    let mut targets: Vec<String> = driver
        .read_dir(&ws.source_root)
        .map_err(LinkpackError::Driver)?
        .into_iter()
        .map(|entry| entry.name)
        .filter(|name| !name.starts_with('.') && *name != own_name)
        .collect();
    targets.sort();

    let config = Config::with_targets(targets);
    let format = Format::from_path(&ws.config_path);
    let text = config::encode(&config, format)
        .with_context(|| format!("failed to encode {}", ws.config_path.display()))?;
    driver
        .write_file(&ws.config_path, text.as_bytes(), CONFIG_MODE)
        .map_err(LinkpackError::Driver)?;

    log.info(&format!(
        "wrote {} target(s) to {}",
        config.targets.len(),
        ws.config_path.display()
    ));
    Ok(config)
}
