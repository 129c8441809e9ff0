//! Subcommand orchestration.
//!
//! Every command takes the storage [`Driver`] explicitly, so tests run the
//! same code paths against a [`RecordingDriver`](crate::fs::RecordingDriver)
//! or a temporary directory.
pub mod check;
pub mod init;
pub mod install;
pub mod show;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::loader;
use crate::error::LinkpackError;
use crate::fs::Driver;
use crate::logging::Logger;
use crate::tree::{self, ResolveOptions, Tree};

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Paths shared by every command, resolved once from the global options.
#[derive(Clone)]
pub struct Workspace {
    /// Configuration file.
    pub config_path: PathBuf,
    /// Directory holding the packages; link originals live under it.
    pub source_root: PathBuf,
    /// Destination root used when the configuration declares no `baseDir`.
    pub base_dir: String,
    /// Directory against which relative paths are resolved.
    pub cwd: Option<PathBuf>,
    env: Lookup,
}

impl fmt::Debug for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workspace")
            .field("config_path", &self.config_path)
            .field("source_root", &self.source_root)
            .field("base_dir", &self.base_dir)
            .field("cwd", &self.cwd)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Resolve the workspace from the process environment and working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be read or no
    /// default base directory can be determined.
    pub fn from_env(global: &GlobalOpts) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read the current directory")?;
        Self::resolve(global, Some(cwd), tree::envsubst::process_env)
    }

    /// Resolve the workspace against `cwd`, reading variables through `env`.
    ///
    /// The source root is `--source`, else the directory of the
    /// configuration file. The default base directory is `--base-dir`, else
    /// the user configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `--base-dir` is absent and the user configuration
    /// directory cannot be determined from `env`.
    pub fn resolve<F>(global: &GlobalOpts, cwd: Option<PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        let anchor = |path: &Path| match &cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        };
        let config_path = anchor(&global.config);
        let source_root = global.source.as_deref().map_or_else(
            || {
                config_path
                    .parent()
                    .map_or_else(PathBuf::new, Path::to_path_buf)
            },
            anchor,
        );
        let base_dir = match &global.base_dir {
            Some(dir) => dir.to_string_lossy().into_owned(),
            None => default_base_dir(&env).context(
                "cannot determine the user configuration directory; \
                 set HOME or XDG_CONFIG_HOME, or pass --base-dir",
            )?,
        };

        Ok(Self {
            config_path,
            source_root,
            base_dir,
            cwd,
            env: Arc::new(env),
        })
    }

    /// Tree builder options for this workspace, with substitution enabled.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        let env = Arc::clone(&self.env);
        let mut options = ResolveOptions::new()
            .envsubst(true)
            .env(move |name| env(name))
            .base_dir(self.base_dir.clone());
        if let Some(cwd) = &self.cwd {
            options = options.cwd(cwd.clone());
        }
        options
    }
}

/// The user configuration directory: `$XDG_CONFIG_HOME`, else
/// `$HOME/.config`; `%APPDATA%` takes precedence on Windows.
fn default_base_dir(env: &dyn Fn(&str) -> Option<String>) -> Option<String> {
    let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());
    if cfg!(windows)
        && let Some(appdata) = non_empty("APPDATA")
    {
        return Some(appdata);
    }
    non_empty("XDG_CONFIG_HOME").or_else(|| {
        non_empty("HOME").map(|home| {
            Path::new(&home)
                .join(".config")
                .to_string_lossy()
                .into_owned()
        })
    })
}

/// Load the workspace configuration through `driver` and resolve it.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or decoded, or if
/// resolution fails.
pub fn load_tree(driver: &dyn Driver, ws: &Workspace, log: &Logger) -> Result<Tree> {
    log.debug(&format!("loading {}", ws.config_path.display()));
    let config = loader::load(driver, &ws.config_path)?;
    let tree = tree::resolve(&config, &ws.resolve_options()).map_err(LinkpackError::from)?;
    log.debug(&format!("resolved {} packages", tree.len()));
    Ok(tree)
}
