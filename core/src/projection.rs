//! Projections of a match set
//!
//! - [`filter`] rebuilds a pruned tree that holds only the matched branches.
//! - [`flat_filter`] maps each matched path to the value it resolves to.
//!
//! Both run [`find`] first and reuse its path order.

use crate::{copy, find, get_by_path, MatchSet, Needle, Object, Path, Value};
use indexmap::IndexMap;

/// Build a pruned copy of `value` holding only the branches that lead to a
/// match.
///
/// The result is always an Object at the root; nested Arrays stay Arrays
/// (skipped slots become [`Value::Hole`]s, which are not own keys). No
/// matches yields an empty Object.
///
/// A match on an empty key at the root (the dotted path `""`) is left out
/// of the pruned tree. It still appears in [`find`] and [`flat_filter`].
///
/// # Example
///
/// ```
/// use delve::{filter, Needle, Value};
///
/// let tree = Value::object([
///     ("keep", Value::from("needle")),
///     ("drop", Value::from("hay")),
///     ("nested", Value::object([("also", Value::from("needle")), ("not", Value::from(1))])),
/// ]);
///
/// assert_eq!(
///     filter(&tree, &Needle::from("needle"), 3),
///     Value::object([
///         ("keep", Value::from("needle")),
///         ("nested", Value::object([("also", Value::from("needle"))])),
///     ]),
/// );
/// ```
#[must_use]
pub fn filter(value: &Value, needle: &Needle, depth: usize) -> Value {
    let matches = find(value, needle, depth);
    let pruned = prune(value, &matches);
    tracing::debug!(needle = needle.kind(), depth, matches = matches.len(), "filter");
    pruned
}

/// Fold `matches` through [`copy`] into a fresh Object.
///
/// The empty dotted path is skipped, see [`filter`].
#[must_use]
pub fn prune(value: &Value, matches: &MatchSet) -> Value {
    let mut result = Value::Object(Object::new());
    for path in matches.iter().filter(|path| !path.is_empty()) {
        copy(value, &mut result, &Path::parse(path));
    }
    result
}

/// Map each matched path to the value it resolves to in `value`.
///
/// The keys of the result are exactly the paths [`find`] returns, in the
/// same order.
///
/// # Example
///
/// ```
/// use delve::{flat_filter, Needle, Value};
///
/// let tree = Value::object([("a", Value::object([("b", Value::from("hit"))]))]);
/// let flat = flat_filter(&tree, &Needle::from("hit"), 3);
///
/// assert_eq!(flat.get("a.b"), Some(&Value::from("hit")));
/// assert_eq!(flat.keys().collect::<Vec<_>>(), ["a.b"]);
/// ```
#[must_use]
pub fn flat_filter(value: &Value, needle: &Needle, depth: usize) -> FlatMatches {
    let matches = find(value, needle, depth);
    let flat = flatten(value, &matches);
    tracing::debug!(needle = needle.kind(), depth, matches = flat.len(), "flat_filter");
    flat
}

/// Resolve every path of `matches` against `value`.
#[must_use]
pub fn flatten(value: &Value, matches: &MatchSet) -> FlatMatches {
    let entries = matches
        .iter()
        .map(|path| (path.clone(), get_by_path(value, path.as_str()).cloned()))
        .collect();
    FlatMatches { entries }
}

/// Flat mapping from dotted path to resolved value, in match order.
///
/// An entry is `None` only if its path does not resolve, which cannot happen
/// for paths produced by [`find`] over the same tree unless a key contains a
/// `.` (the dotted form is then ambiguous).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMatches {
    entries: IndexMap<String, Option<Value>>,
}

impl FlatMatches {
    /// The resolved value at `path`, if `path` matched and resolves.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.entries.get(path).and_then(Option::as_ref)
    }

    /// Returns `true` if `path` is one of the matched paths.
    #[must_use]
    pub fn contains_key(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Matched paths, in match order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(path, resolved value)` pairs, in match order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Number of matched paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into an Object keyed by dotted path. Unresolved entries
    /// become [`Value::Undefined`].
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(
            self.entries
                .into_iter()
                .map(|(k, v)| (k, v.unwrap_or(Value::Undefined)))
                .collect(),
        )
    }
}
