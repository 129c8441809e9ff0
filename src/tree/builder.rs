//! Configuration → tree resolution.
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use super::envsubst;
use super::{Node, Tree, TreePath};
use crate::config::Config;
use crate::error::ResolveError;

/// Variable lookup used for `${NAME}` substitution.
type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Knobs for [`resolve`]. All are optional and independent.
///
/// # Examples
///
/// ```
/// use linkpack::config::Config;
/// use linkpack::tree::{ResolveOptions, TreePath, resolve};
///
/// let config = Config::with_targets(["vimrc"]);
/// let tree = resolve(&config, &ResolveOptions::new().base_dir("/home/user")).unwrap();
/// let node = &tree.root.children[0];
/// assert_eq!(node.link, Some(TreePath::new("/home/user", ["vimrc"])));
/// ```
#[derive(Clone, Default)]
pub struct ResolveOptions {
    base_dir: Option<String>,
    cwd: Option<PathBuf>,
    envsubst: bool,
    lookup: Option<Lookup>,
}

impl fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveOptions")
            .field("base_dir", &self.base_dir)
            .field("cwd", &self.cwd)
            .field("envsubst", &self.envsubst)
            .field("lookup", &self.lookup.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ResolveOptions {
    /// Options with every knob off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination root used when the configuration declares no `baseDir`.
    #[must_use]
    pub fn base_dir(mut self, dir: impl Into<String>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Directory against which relative base directories are resolved.
    #[must_use]
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Enable `${NAME}` substitution in base directories and link overrides.
    #[must_use]
    pub const fn envsubst(mut self, enabled: bool) -> Self {
        self.envsubst = enabled;
        self
    }

    /// Replace the process environment as the substitution source.
    #[must_use]
    pub fn env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    fn substitute(&self, input: &str) -> Result<String, ResolveError> {
        if !self.envsubst {
            return Ok(input.to_string());
        }
        match &self.lookup {
            Some(lookup) => envsubst::substitute(input, |name| lookup(name)),
            None => envsubst::substitute(input, envsubst::process_env),
        }
    }

    /// Substitute `dir` and anchor it on `cwd` when it is relative.
    fn resolve_dir(&self, dir: &str) -> Result<String, ResolveError> {
        let dir = self.substitute(dir)?;
        Ok(self.anchor(dir))
    }

    fn anchor(&self, dir: String) -> String {
        match &self.cwd {
            Some(cwd) if !dir.is_empty() && Path::new(&dir).is_relative() => {
                cwd.join(&dir).to_string_lossy().into_owned()
            }
            _ => dir,
        }
    }

    /// Base directory of the top level: the declared `baseDir`, else the
    /// caller's default, else empty.
    fn root_base(&self, declared: Option<&str>) -> Result<String, ResolveError> {
        match declared.filter(|dir| !dir.is_empty()) {
            Some(dir) => self.resolve_dir(dir),
            None => Ok(self
                .base_dir
                .clone()
                .map(|dir| self.anchor(dir))
                .unwrap_or_default()),
        }
    }

    fn link_name(&self, target: &str, link: &str) -> Result<String, ResolveError> {
        let name = self.substitute(link)?;
        let reason = if name.is_empty() {
            Some("link name is empty")
        } else if name == "." || name == ".." {
            Some("link name must not be '.' or '..'")
        } else if Path::new(&name).has_root() {
            Some("link name must be relative")
        } else if !is_single_segment(&name) {
            Some("link name must be a single path segment")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ResolveError::MalformedOverride {
                target: target.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(name),
        }
    }
}

/// `name` names exactly one entry inside its parent directory.
fn is_single_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Paths accumulated from the enclosing levels.
struct Parent {
    source: TreePath,
    link: TreePath,
}

/// Resolve `config` into a tree of `(target, link)` pairs.
///
/// Target names are sorted at every level, so the result never depends on
/// declaration order. Options keyed by names that are not listed in
/// `targets` are ignored.
///
/// # Errors
///
/// Returns a [`ResolveError`] if a link override is malformed or, with
/// substitution enabled, a referenced variable is undefined. No partial
/// tree is returned.
pub fn resolve(config: &Config, options: &ResolveOptions) -> Result<Tree, ResolveError> {
    let base = options.root_base(config.base_dir.as_deref())?;
    tracing::debug!(
        base = %base,
        targets = config.targets.len(),
        envsubst = options.envsubst,
        "resolving configuration"
    );
    let parent = Parent {
        source: TreePath::default(),
        link: TreePath::new(base, Vec::<String>::new()),
    };
    let children = resolve_level(config, options, &parent)?;
    Ok(Tree {
        root: Node::root(children),
    })
}

fn resolve_level(
    config: &Config,
    options: &ResolveOptions,
    parent: &Parent,
) -> Result<Vec<Node>, ResolveError> {
    let mut names: Vec<&str> = config.targets.iter().map(String::as_str).collect();
    names.sort_unstable();
    names
        .into_iter()
        .map(|name| resolve_target(config, options, parent, name))
        .collect()
}

fn resolve_target(
    config: &Config,
    options: &ResolveOptions,
    parent: &Parent,
    name: &str,
) -> Result<Node, ResolveError> {
    let option = config.options.get(name);
    let target = parent.source.join(name);

    let leaf = match option.and_then(|o| o.link.as_deref()) {
        Some(link) => options.link_name(name, link)?,
        None => name.to_string(),
    };
    let link = match option.and_then(|o| o.base_dir.as_deref()) {
        Some(dir) if !dir.is_empty() => parent.link.with_base(options.resolve_dir(dir)?),
        _ => parent.link.clone(),
    }
    .join(leaf);

    let children = match option {
        Some(nested) if !nested.targets.is_empty() => {
            let scope = Parent {
                source: target.clone(),
                link: link.clone(),
            };
            resolve_level(nested, options, &scope)?
        }
        _ => Vec::new(),
    };

    tracing::trace!(
        %target,
        %link,
        depth = link.depth(),
        children = children.len(),
        "resolved target"
    );
    Ok(Node::new(target, link, children))
}
