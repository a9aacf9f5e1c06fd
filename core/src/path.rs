//! `Path` and the path accessor
//!
//! A [`Path`] is a sequence of key segments. Its external form is a
//! dot-delimited string (`"obj.array.7.0"`); array indices are plain
//! stringified integers, so a path carries no record of whether a segment
//! addressed an object key or an array slot.
//!
//! [`get_by_path`] resolves a path against a root value one own key at a
//! time. A missing path is an ordinary `None`, never an error.

use crate::Value;
use std::fmt;

/// An ordered sequence of key segments.
///
/// # Example
///
/// ```
/// use delve::Path;
///
/// let path = Path::parse("array.7.0");
/// assert_eq!(path.segments(), ["array", "7", "0"]);
/// assert_eq!(path.to_string(), "array.7.0");
/// assert_eq!(Path::parse("").segments(), [""]);
/// assert!(Path::new().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a dot-delimited string into segments.
    ///
    /// Always yields at least one segment: `""` is the single empty key, and
    /// `"a."` ends in one. Only [`Path::new`] (or an empty segment list) has
    /// no segments.
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted.split('.').map(str::to_string).collect(),
        }
    }

    /// The path's segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Split into the first segment and the remaining segments.
    #[must_use]
    pub fn split_first(&self) -> Option<(&str, &[String])> {
        self.segments
            .split_first()
            .map(|(first, rest)| (first.as_str(), rest))
    }

    /// Append a segment.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for Path {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

impl From<String> for Path {
    fn from(dotted: String) -> Self {
        Self::parse(&dotted)
    }
}

impl From<&String> for Path {
    fn from(dotted: &String) -> Self {
        Self::parse(dotted)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[String]> for Path {
    fn from(segments: &[String]) -> Self {
        Self {
            segments: segments.to_vec(),
        }
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::from(&segments[..])
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// How [`get_by_path_with`] treats a path with no segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyPath {
    /// An empty path resolves to nothing.
    #[default]
    NotFound,
    /// An empty path resolves to the root itself (when the root is a container).
    Root,
}

/// Resolve `path` against `root`.
///
/// Returns `None` when the root is not a container, when any segment is not
/// an own key of the value it is applied to, or when the path has no
/// segments. The dotted string `""` is the single empty key, not an empty
/// path. A
/// key that exists but holds [`Value::Undefined`] resolves to
/// `Some(&Value::Undefined)`, so absence and a stored undefined stay distinct.
///
/// # Example
///
/// ```
/// use delve::{get_by_path, Value};
///
/// let tree = Value::object([("a", Value::array([Value::from("x")]))]);
/// assert_eq!(get_by_path(&tree, "a.0"), Some(&Value::from("x")));
/// assert_eq!(get_by_path(&tree, "a.1"), None);
/// assert_eq!(get_by_path(&tree, ["a", "0"]), Some(&Value::from("x")));
/// ```
pub fn get_by_path(root: &Value, path: impl Into<Path>) -> Option<&Value> {
    get_by_path_with(root, path, EmptyPath::NotFound)
}

/// Resolve `path` against `root`, choosing how an empty path behaves.
///
/// ```
/// use delve::{get_by_path_with, EmptyPath, Path, Value};
///
/// let tree = Value::object([("a", Value::from(1))]);
/// assert_eq!(get_by_path_with(&tree, Path::new(), EmptyPath::NotFound), None);
/// assert_eq!(get_by_path_with(&tree, Path::new(), EmptyPath::Root), Some(&tree));
/// ```
pub fn get_by_path_with(root: &Value, path: impl Into<Path>, empty: EmptyPath) -> Option<&Value> {
    if !root.is_container() {
        return None;
    }

    let path = path.into();
    if path.is_empty() {
        return match empty {
            EmptyPath::NotFound => None,
            EmptyPath::Root => Some(root),
        };
    }

    path.segments()
        .iter()
        .try_fold(root, |current, segment| current.get(segment))
}
