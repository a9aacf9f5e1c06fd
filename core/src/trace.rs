//! Search trace types for debugging a search.
//!
//! [`find_with_trace`] runs the same walk as [`find`](crate::find) and
//! additionally records one [`TraceStep`] per visited key: what was tested,
//! what matched, and where the depth budget cut the walk off.
//!
//! # INV: `trace.matches` == `find()` result
//!
//! The trace never changes the outcome; it only records it.
//!
//! # Example
//!
//! ```
//! use delve::{find_with_trace, Needle, Value};
//!
//! let tree = Value::object([("deep", Value::object([("x", Value::from("hit"))]))]);
//! let trace = find_with_trace(&tree, &Needle::from("hit"), 1);
//!
//! assert!(trace.matches.is_empty());
//! assert!(trace.steps[0].depth_exhausted);
//! for step in &trace.steps {
//!     println!("{}: key={} value={:?}", step.path, step.key_matched, step.value_matched);
//! }
//! ```

use crate::find::walk;
use crate::{MatchSet, Needle, Value};
use indexmap::IndexSet;

/// One visited key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Full dotted path of the visited key.
    pub path: String,
    /// Whether the key itself matched.
    pub key_matched: bool,
    /// `Some(matched)` if the value was a String/Number leaf and was tested,
    /// `None` if it was not tested.
    pub value_matched: Option<bool>,
    /// Whether the search descended into the value.
    pub descended: bool,
    /// Whether the value was a container skipped for lack of depth budget.
    pub depth_exhausted: bool,
}

impl TraceStep {
    pub(crate) fn new(path: String) -> Self {
        Self {
            path,
            key_matched: false,
            value_matched: None,
            descended: false,
            depth_exhausted: false,
        }
    }

    /// Returns `true` if this step recorded a match.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.key_matched || self.value_matched == Some(true)
    }
}

/// Trace of a full search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTrace {
    /// The same result [`find`](crate::find) returns.
    pub matches: MatchSet,
    /// Every visited key, in visit order (pre-order, depth-first).
    pub steps: Vec<TraceStep>,
}

impl SearchTrace {
    /// Steps whose key or value matched.
    pub fn matched_steps(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(|s| s.matched())
    }

    /// Paths of containers the depth budget prevented the search from entering.
    pub fn exhausted_paths(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .filter(|s| s.depth_exhausted)
            .map(|s| s.path.as_str())
    }
}

/// Run [`find`](crate::find) while recording every step.
#[must_use]
pub fn find_with_trace(value: &Value, needle: &Needle, depth: usize) -> SearchTrace {
    let tester = needle.tester();
    let mut found = IndexSet::new();
    let mut steps = Vec::new();
    walk(value, &*tester, depth, None, &mut found, Some(&mut steps));

    SearchTrace {
        matches: MatchSet::from(found),
        steps,
    }
}
