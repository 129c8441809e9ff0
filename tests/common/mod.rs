// Shared helpers for integration tests.
//
// Provides a temporary directory holding a package source tree and a
// destination "home", so each test can run commands against the real
// filesystem in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use linkpack::cli::GlobalOpts;
use linkpack::commands::Workspace;
use linkpack::logging::Logger;

/// An isolated source tree and destination backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory containing `dots/` and `home/`.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create empty `dots/` and `home/` directories.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(root.path().join("dots")).expect("create dots dir");
        std::fs::create_dir(root.path().join("home")).expect("create home dir");
        Self { root }
    }

    /// Directory holding the packages.
    pub fn source(&self) -> PathBuf {
        self.root.path().join("dots")
    }

    /// Destination root passed as `--base-dir`.
    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    /// Path of the configuration file inside the source tree.
    pub fn config_path(&self) -> PathBuf {
        self.source().join("linkpack.toml")
    }

    /// Create an empty file at `rel` under the source tree, with parents.
    pub fn add_file(&self, rel: &str) -> &Self {
        let path = self.source().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, "").expect("write package file");
        self
    }

    /// Create a directory at `rel` under the source tree.
    pub fn add_dir(&self, rel: &str) -> &Self {
        std::fs::create_dir_all(self.source().join(rel)).expect("create package dir");
        self
    }

    /// Write the configuration document.
    pub fn write_config(&self, text: &str) -> &Self {
        std::fs::write(self.config_path(), text).expect("write config");
        self
    }

    /// Global options pointing at this context.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            config: self.config_path(),
            base_dir: Some(self.home()),
            source: None,
        }
    }

    /// Workspace with an empty environment.
    pub fn workspace(&self) -> Workspace {
        let cwd = self.root.path().to_path_buf();
        Workspace::resolve(&self.global(), Some(cwd), |_: &str| None)
            .expect("workspace with an explicit base directory")
    }
}

/// A logger for commands under test; events go nowhere without a subscriber.
pub fn logger() -> Logger {
    Logger::new("test")
}

/// Where the symlink at `path` points.
pub fn link_target(path: &Path) -> PathBuf {
    std::fs::read_link(path).expect("expected a symlink")
}
