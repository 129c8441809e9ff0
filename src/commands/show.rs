//! Command: print the resolved link tree.
use std::io::Write;

use anyhow::Result;

use super::{Workspace, load_tree};
use crate::cli::ShowOpts;
use crate::fs::Driver;
use crate::logging::Logger;

/// Run the show command.
///
/// The tree is rendered in full before anything is written, so a failure
/// produces no partial output.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or resolved, or
/// if writing to `out` fails.
pub fn run(
    driver: &dyn Driver,
    ws: &Workspace,
    opts: &ShowOpts,
    out: &mut dyn Write,
    log: &Logger,
) -> Result<()> {
    let tree = load_tree(driver, ws, log)?;
    let mut rendered = if opts.json {
        serde_json::to_string_pretty(&tree)?
    } else {
        tree.to_string()
    };
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    out.write_all(rendered.as_bytes())?;
    Ok(())
}
