//! Structured logger with dry-run awareness.
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::utils::log_file_path;

/// Structured logger used by command handlers.
///
/// Every method emits a [`tracing`] event; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) renders it on stderr and
/// appends it to `$XDG_CACHE_HOME/linkpack/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    command: String,
    warnings: AtomicUsize,
}

impl Logger {
    /// Create a logger for `command`. Does not touch the filesystem.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Path of this command's log file, creating the cache directory if needed.
    #[must_use]
    pub fn log_path(&self) -> Option<PathBuf> {
        log_file_path(&self.command)
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{msg}");
    }

    /// Number of warnings logged so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log an action that a dry run would have performed.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::super::isolated_logger;
    use std::fs;

    #[test]
    fn messages_reach_log_file_with_tags() {
        let (log, _tmp, path, _guard) = isolated_logger();
        log.stage("Installing links");
        log.info("plain");
        log.debug("details");
        log.warn("conflict");
        log.error("broken");
        log.dry_run("would link");

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("==> Installing links"), "{contents}");
        assert!(contents.contains("     plain"), "{contents}");
        assert!(contents.contains("[debug]"), "{contents}");
        assert!(contents.contains("details"), "{contents}");
        assert!(contents.contains("[warn] conflict"), "{contents}");
        assert!(contents.contains("[error] broken"), "{contents}");
        assert!(contents.contains("[dry run] would link"), "{contents}");
    }

    #[test]
    fn warnings_are_counted() {
        let (log, _tmp, _path, _guard) = isolated_logger();
        assert_eq!(log.warning_count(), 0);
        log.warn("one");
        log.warn("two");
        log.info("not a warning");
        assert_eq!(log.warning_count(), 2);
    }
}
