//! Resolved link trees.
//!
//! [`resolve`] turns a [`Config`](crate::config::Config) into a [`Tree`] of
//! `(target, link)` pairs: `target` is the package path relative to the
//! source root, `link` the destination where the symlink belongs.
mod builder;
pub mod envsubst;
mod path;

pub use builder::{ResolveOptions, resolve};
pub use path::TreePath;

use serde::Serialize;
use std::fmt;

/// One resolved package. Only the root has neither target nor link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Package path relative to the source root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TreePath>,
    /// Destination of the symlink.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<TreePath>,
    /// Nested packages, sorted by target name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// A non-root node.
    #[must_use]
    pub const fn new(target: TreePath, link: TreePath, children: Vec<Self>) -> Self {
        Self {
            target: Some(target),
            link: Some(link),
            children,
        }
    }

    /// A root node holding `children`.
    #[must_use]
    pub const fn root(children: Vec<Self>) -> Self {
        Self {
            target: None,
            link: None,
            children,
        }
    }

    /// Returns `true` for the root node.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.target.is_none() && self.link.is_none()
    }

    /// Returns `true` when the node declares no nested packages.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn label(&self) -> String {
        match (&self.link, &self.target) {
            (Some(link), Some(target)) => format!("{link} -> {target}"),
            _ => ".".to_string(),
        }
    }

    fn to_termtree(&self) -> termtree::Tree<String> {
        termtree::Tree::new(self.label()).with_leaves(self.children.iter().map(Self::to_termtree))
    }
}

/// A fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tree {
    /// Root node; its children are the top-level packages.
    pub root: Node,
}

impl Tree {
    /// Iterate over every non-root node, depth-first, parents before children.
    pub fn walk(&self) -> impl Iterator<Item = &Node> {
        let mut stack: Vec<&Node> = self.root.children.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Number of non-root nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    /// Returns `true` when the tree has no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root.to_termtree())
    }
}
