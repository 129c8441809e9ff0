//! Command: report the state of every link.
use std::fmt;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use super::{Workspace, load_tree};
use crate::cli::CheckOpts;
use crate::error::LinkpackError;
use crate::fs::Driver;
use crate::logging::Logger;

/// Observed state of a link destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// A symlink to the expected original exists.
    Linked,
    /// Nothing exists at the destination.
    Missing,
    /// Something else occupies the destination.
    Conflict {
        /// What was found instead.
        reason: String,
    },
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linked => f.write_str("linked"),
            Self::Missing => f.write_str("missing"),
            Self::Conflict { reason } => write!(f, "conflict: {reason}"),
        }
    }
}

/// Inspect `link` and compare it against the expected `original`.
///
/// # Errors
///
/// Returns [`LinkpackError::Driver`] if the destination's metadata cannot be
/// read.
pub fn inspect(
    driver: &dyn Driver,
    link: &Path,
    original: &Path,
) -> Result<LinkState, LinkpackError> {
    let info = driver.stat(link)?;
    if !info.exists {
        return Ok(LinkState::Missing);
    }
    let reason = match info.link_target {
        Some(target) if info.is_symlink && target == original => return Ok(LinkState::Linked),
        Some(target) => format!("symlink points to {}", target.display()),
        None if info.is_dir => "directory exists".to_string(),
        None => "file exists".to_string(),
    };
    Ok(LinkState::Conflict { reason })
}

/// Run the check command: one line per leaf link on `out`.
///
/// # Errors
///
/// Returns an error if the tree cannot be loaded, a destination cannot be
/// inspected, or any link is not in place.
pub fn run(
    driver: &dyn Driver,
    ws: &Workspace,
    _opts: &CheckOpts,
    out: &mut dyn Write,
    log: &Logger,
) -> Result<()> {
    let tree = load_tree(driver, ws, log)?;
    let mut total = 0usize;
    let mut pending = 0usize;
    for node in tree.walk().filter(|n| n.is_leaf()) {
        let (Some(target), Some(link)) = (&node.target, &node.link) else {
            continue;
        };
        let link = link.to_path_buf();
        let original = ws.source_root.join(target.to_path_buf());
        let state = inspect(driver, &link, &original)?;
        total += 1;
        if state != LinkState::Linked {
            pending += 1;
        }
        writeln!(out, "{state}\t{}", link.display())?;
    }
    if pending > 0 {
        anyhow::bail!("{pending} link(s) not in place");
    }
    log.info(&format!("all {total} link(s) in place"));
    Ok(())
}
