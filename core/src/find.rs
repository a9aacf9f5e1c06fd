//! Tree matcher: the recursive search
//!
//! [`find`] walks a container's own keys in natural order, testing each key
//! and each String/Number leaf against a needle, and descends into nested
//! containers while the depth budget lasts. It returns the dotted paths of
//! every match as a [`MatchSet`].
//!
//! # Depth budget
//!
//! The budget counts levels of descent, not absolute depth: a budget of 1
//! tests only the root's own keys and leaves, each descent spends one level,
//! and a budget of 0 returns nothing. Since the budget strictly shrinks on
//! every descent, self-referential structures still terminate.

use crate::trace::TraceStep;
use crate::{Needle, Path, Tester, Value};
use indexmap::IndexSet;
use std::ops::Deref;

/// Deduplicated, discovery-ordered list of matching dotted paths.
///
/// Order is depth-first in each container's natural key order. A path that
/// would be recorded twice (a key that matches both by name and by value)
/// keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    paths: Vec<String>,
}

impl MatchSet {
    /// An empty match set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The matching paths, in discovery order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// Returns `true` if `path` is in the set.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    /// Parse every match into a [`Path`].
    #[must_use]
    pub fn to_paths(&self) -> Vec<Path> {
        self.paths.iter().map(|p| Path::parse(p)).collect()
    }

    /// Consume the set, returning the paths.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }
}

impl Deref for MatchSet {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.paths
    }
}

impl From<IndexSet<String>> for MatchSet {
    fn from(set: IndexSet<String>) -> Self {
        Self {
            paths: set.into_iter().collect(),
        }
    }
}

impl IntoIterator for MatchSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl<const N: usize> PartialEq<[&str; N]> for MatchSet {
    fn eq(&self, other: &[&str; N]) -> bool {
        self.paths == other[..]
    }
}

impl PartialEq<[&str]> for MatchSet {
    fn eq(&self, other: &[&str]) -> bool {
        self.paths == other
    }
}

impl PartialEq<Vec<&str>> for MatchSet {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.paths == *other
    }
}

impl PartialEq<Vec<String>> for MatchSet {
    fn eq(&self, other: &Vec<String>) -> bool {
        self.paths == *other
    }
}

/// Find every path in `value` whose key or String/Number leaf matches `needle`.
///
/// - `depth == 0` or a non-container `value` yields an empty set.
/// - Keys are tested by name; a match records the key's path.
/// - String and Number leaves are tested by their string form; a match
///   records the key's path. Key and value tests fire independently.
/// - Container values are searched with `depth - 1`, their matches prefixed
///   with `key.`.
///
/// # Example
///
/// ```
/// use delve::{find, Needle, Value};
///
/// let tree = Value::object([
///     ("str", Value::from("this is string")),
///     ("list", Value::array([Value::array([Value::from("string")])])),
/// ]);
///
/// assert_eq!(find(&tree, &Needle::from("string"), 3), ["str", "list.0.0"]);
/// assert_eq!(find(&tree, &Needle::from("string"), 2), ["str"]);
/// assert!(find(&tree, &Needle::from("string"), 0).is_empty());
/// ```
pub fn find(value: &Value, needle: &Needle, depth: usize) -> MatchSet {
    let tester = needle.tester();
    let mut found = IndexSet::new();
    walk(value, &*tester, depth, None, &mut found, None);

    tracing::debug!(
        needle = needle.kind(),
        depth,
        matches = found.len(),
        "find"
    );
    MatchSet::from(found)
}

/// Depth-first walk shared by [`find`] and [`find_with_trace`](crate::find_with_trace).
pub(crate) fn walk(
    value: &Value,
    tester: &dyn Tester,
    depth: usize,
    prefix: Option<&str>,
    found: &mut IndexSet<String>,
    mut steps: Option<&mut Vec<TraceStep>>,
) {
    if depth == 0 || !value.is_container() {
        return;
    }

    for (key, child) in value.entries() {
        let path = join(prefix, &key);
        let mut step = TraceStep::new(path.clone());

        if tester.test(&key) {
            step.key_matched = true;
            found.insert(path.clone());
        }

        if let Some(leaf) = child.to_search_string() {
            let matched = tester.test(&leaf);
            step.value_matched = Some(matched);
            if matched {
                found.insert(path.clone());
            }
        } else if child.is_container() {
            if depth > 1 {
                step.descended = true;
            } else {
                step.depth_exhausted = true;
                tracing::trace!(path = %path, "depth budget exhausted");
            }
            if let Some(steps) = steps.as_deref_mut() {
                steps.push(step);
            }
            walk(child, tester, depth - 1, Some(&path), found, steps.as_deref_mut());
            continue;
        }

        if let Some(steps) = steps.as_deref_mut() {
            steps.push(step);
        }
    }
}

/// `None` is the root; `Some("")` is an empty key below it.
fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        None => key.to_string(),
        Some(prefix) => format!("{prefix}.{key}"),
    }
}
