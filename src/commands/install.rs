//! Command: create the links described by the configuration.
use std::path::Path;

use anyhow::Result;

use super::check::{LinkState, inspect};
use super::{Workspace, load_tree};
use crate::cli::InstallOpts;
use crate::error::LinkpackError;
use crate::fs::Driver;
use crate::logging::Logger;
use crate::tree::{Node, Tree};

/// Outcome counts of one install run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Links created (or that would be created in a dry run).
    pub created: usize,
    /// Links already pointing at the right original.
    pub existing: usize,
    /// Destinations occupied by something else, left untouched.
    pub conflicts: usize,
}

struct Installer<'a> {
    driver: &'a dyn Driver,
    source_root: &'a Path,
    dry_run: bool,
    log: &'a Logger,
    summary: Summary,
}

impl Installer<'_> {
    fn apply(&mut self, node: &Node) -> Result<(), LinkpackError> {
        if node.is_root() {
            for child in &node.children {
                self.apply(child)?;
            }
            return Ok(());
        }
        let (Some(target), Some(link)) = (&node.target, &node.link) else {
            return Ok(());
        };
        let link = link.to_path_buf();

        if !node.is_leaf() {
            if !self.ensure_dir(&link)? {
                return Ok(());
            }
            for child in &node.children {
                self.apply(child)?;
            }
            return Ok(());
        }

        let original = self.source_root.join(target.to_path_buf());
        match inspect(self.driver, &link, &original)? {
            LinkState::Linked => {
                self.log.debug(&format!("already linked: {}", link.display()));
                self.summary.existing += 1;
            }
            LinkState::Conflict { reason } => {
                self.log.warn(&format!("skipping {}: {reason}", link.display()));
                self.summary.conflicts += 1;
            }
            LinkState::Missing if self.dry_run => {
                self.log.dry_run(&format!(
                    "would link {} -> {}",
                    link.display(),
                    original.display()
                ));
                self.summary.created += 1;
            }
            LinkState::Missing => {
                if let Some(parent) = link.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.driver.mkdir_all(parent)?;
                }
                self.driver.symlink(&original, &link)?;
                self.log.info(&format!("linked {} -> {}", link.display(), original.display()));
                self.summary.created += 1;
            }
        }
        Ok(())
    }

    /// Make sure a directory node's destination can hold its children.
    /// Returns `false` when the subtree must be skipped.
    fn ensure_dir(&mut self, link: &Path) -> Result<bool, LinkpackError> {
        let info = self.driver.stat(link)?;
        if info.is_dir || info.is_symlink {
            return Ok(true);
        }
        if info.exists {
            self.log.warn(&format!("skipping {}: not a directory", link.display()));
            self.summary.conflicts += 1;
            return Ok(false);
        }
        if self.dry_run {
            self.log.dry_run(&format!("would create directory {}", link.display()));
        } else {
            self.driver.mkdir_all(link)?;
            self.log.debug(&format!("created directory {}", link.display()));
        }
        Ok(true)
    }
}

/// Run the install command.
///
/// Directory nodes are created, leaf nodes become symlinks to their
/// package under the source root. Existing correct links are left alone and
/// occupied destinations are reported and skipped.
///
/// # Errors
///
/// Returns an error if the tree cannot be loaded or any storage operation
/// fails. Operations already applied are not rolled back.
pub fn run(
    driver: &dyn Driver,
    ws: &Workspace,
    opts: &InstallOpts,
    log: &Logger,
) -> Result<Summary> {
    let tree = load_tree(driver, ws, log)?;
    warn_unanchored(&tree, log);

    log.stage(if opts.dry_run {
        "Installing links (dry run)"
    } else {
        "Installing links"
    });

    let mut installer = Installer {
        driver,
        source_root: &ws.source_root,
        dry_run: opts.dry_run,
        log,
        summary: Summary::default(),
    };
    installer.apply(&tree.root)?;

    let summary = installer.summary;
    log.info(&format!(
        "{} created, {} already linked, {} skipped",
        summary.created, summary.existing, summary.conflicts
    ));
    Ok(summary)
}

/// Links without a base directory land relative to wherever the process runs.
fn warn_unanchored(tree: &Tree, log: &Logger) {
    let unanchored = tree
        .walk()
        .filter_map(|node| node.link.as_ref())
        .filter(|link| link.is_relative_to_root())
        .count();
    if unanchored > 0 {
        log.warn(&format!(
            "{unanchored} link(s) have no base directory and resolve against the current directory"
        ));
    }
}
