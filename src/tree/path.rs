//! Segment-based paths shared by package sources and link destinations.
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A resolved path split into a base directory and an ordered list of name
/// segments.
///
/// Nested packages extend the segment list one name at a time, so a child
/// path is always its parent plus one segment. Equality is structural:
/// `{"a", ["b", "c"]}` and `{"a/b", ["c"]}` render identically but are not
/// equal.
///
/// # Examples
///
/// ```
/// use linkpack::tree::TreePath;
///
/// let link = TreePath::new("/home/user", ["config"]).join("nvim");
/// assert_eq!(link.segments(), ["config", "nvim"]);
/// assert_eq!(link.base(), "/home/user");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TreePath {
    base: String,
    segments: Vec<String>,
}

impl TreePath {
    /// Create a path from a base directory and its segments.
    #[must_use]
    pub fn new<B, I, S>(base: B, segments: I) -> Self
    where
        B: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base: base.into(),
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a path with an empty base, i.e. relative to the source root.
    #[must_use]
    pub fn relative<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(String::new(), segments)
    }

    /// Base directory this path hangs off.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Name segments below the base, outermost first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments below the base.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when the base is empty.
    #[must_use]
    pub fn is_relative_to_root(&self) -> bool {
        self.base.is_empty()
    }

    /// Return a new path with `segment` appended.
    #[must_use]
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self {
            base: self.base.clone(),
            segments,
        }
    }

    /// Return a new path with the same segments hanging off `base`.
    #[must_use]
    pub fn with_base(&self, base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            segments: self.segments.clone(),
        }
    }

    /// Join base and segments with the platform separator.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        let mut path = PathBuf::from(&self.base);
        for segment in &self.segments {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_buf().display())
    }
}
