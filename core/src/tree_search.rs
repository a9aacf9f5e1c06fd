//! `TreeSearch`: search operations as methods on a root value
//!
//! An extension trait that forwards to the free functions with `self` as the
//! root, so a debugging session can write `tree.find("x")` instead of
//! `find(&tree, &Needle::from("x"), DEFAULT_DEPTH)`. It carries no behavior
//! of its own.

use crate::{
    filter, find, flat_filter, get_by_path, FlatMatches, MatchSet, Needle, Path, Value,
    DEFAULT_DEPTH,
};

/// Search methods on a tree root.
///
/// # Example
///
/// ```
/// use delve::{TreeSearch, Value};
///
/// let tree = Value::object([("fn", Value::function(|_| Value::Null))]);
/// assert_eq!(tree.find("fn"), ["fn"]);
/// assert_eq!(tree.find_depth("fn", 0), [] as [&str; 0]);
/// assert!(tree.get_by_path("fn").is_some());
/// ```
pub trait TreeSearch {
    /// [`find`] at [`DEFAULT_DEPTH`].
    fn find(&self, needle: impl Into<Needle>) -> MatchSet;

    /// [`find`] with an explicit depth budget.
    fn find_depth(&self, needle: impl Into<Needle>, depth: usize) -> MatchSet;

    /// [`filter`] at [`DEFAULT_DEPTH`].
    fn filter(&self, needle: impl Into<Needle>) -> Value;

    /// [`filter`] with an explicit depth budget.
    fn filter_depth(&self, needle: impl Into<Needle>, depth: usize) -> Value;

    /// [`flat_filter`] at [`DEFAULT_DEPTH`].
    fn flat_filter(&self, needle: impl Into<Needle>) -> FlatMatches;

    /// [`flat_filter`] with an explicit depth budget.
    fn flat_filter_depth(&self, needle: impl Into<Needle>, depth: usize) -> FlatMatches;

    /// [`get_by_path`].
    fn get_by_path(&self, path: impl Into<Path>) -> Option<&Value>;
}

impl TreeSearch for Value {
    fn find(&self, needle: impl Into<Needle>) -> MatchSet {
        self.find_depth(needle, DEFAULT_DEPTH)
    }

    fn find_depth(&self, needle: impl Into<Needle>, depth: usize) -> MatchSet {
        find(self, &needle.into(), depth)
    }

    fn filter(&self, needle: impl Into<Needle>) -> Value {
        self.filter_depth(needle, DEFAULT_DEPTH)
    }

    fn filter_depth(&self, needle: impl Into<Needle>, depth: usize) -> Value {
        filter(self, &needle.into(), depth)
    }

    fn flat_filter(&self, needle: impl Into<Needle>) -> FlatMatches {
        self.flat_filter_depth(needle, DEFAULT_DEPTH)
    }

    fn flat_filter_depth(&self, needle: impl Into<Needle>, depth: usize) -> FlatMatches {
        flat_filter(self, &needle.into(), depth)
    }

    fn get_by_path(&self, path: impl Into<Path>) -> Option<&Value> {
        get_by_path(self, path)
    }
}
