//! `Tester`: The per-search string test
//!
//! A search tests two kinds of candidate strings: keys, and the string form
//! of String/Number leaves. Both go through one [`Tester`] chosen from the
//! needle before the walk starts, so the walk itself never inspects the
//! needle again.
//!
//! # Available Testers
//!
//! - [`SubstringTester`]: case-sensitive substring containment
//! - [`PatternTester`]: regular expression search
//! - [`PredicateTester`]: caller-supplied closure

use std::fmt::{self, Debug};
use std::sync::Arc;

/// Tests a candidate key or stringified leaf.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a compiled needle can be
/// shared across threads.
///
/// # Example
///
/// ```
/// use delve::{SubstringTester, Tester};
///
/// let tester = SubstringTester::new("100");
/// assert!(tester.test("100500"));
/// assert!(!tester.test("10.05"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Tester`",
    label = "this type cannot test candidate strings",
    note = "use a built-in tester (SubstringTester, PatternTester, PredicateTester) or implement `test(&self, &str) -> bool`"
)]
pub trait Tester: Send + Sync + Debug {
    /// Returns `true` if the candidate matches.
    fn test(&self, candidate: &str) -> bool;
}

// Blanket implementation for boxed Testers
#[diagnostic::do_not_recommend]
impl Tester for Box<dyn Tester> {
    fn test(&self, candidate: &str) -> bool {
        (**self).test(candidate)
    }
}

/// Case-sensitive substring tester.
///
/// An empty needle matches every candidate.
#[derive(Debug, Clone)]
pub struct SubstringTester {
    needle: String,
}

impl SubstringTester {
    /// Create a new substring tester.
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// Returns the substring being searched for.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl Tester for SubstringTester {
    fn test(&self, candidate: &str) -> bool {
        candidate.contains(self.needle.as_str())
    }
}

/// Regular expression tester.
///
/// Uses an unanchored search: the pattern matches if it is found anywhere in
/// the candidate. Anchor with `^`/`$` for whole-string matches.
///
/// ```
/// use delve::{PatternTester, Tester};
///
/// let tester = PatternTester::new(regex::Regex::new(r"^user-\d+$").unwrap());
/// assert!(tester.test("user-42"));
/// assert!(!tester.test("the user-42"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternTester {
    pattern: regex::Regex,
}

impl PatternTester {
    /// Create a new pattern tester.
    #[must_use]
    pub fn new(pattern: regex::Regex) -> Self {
        Self { pattern }
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub fn pattern(&self) -> &regex::Regex {
        &self.pattern
    }
}

impl Tester for PatternTester {
    fn test(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

/// Signature of a predicate needle.
pub type PredicateFn = dyn Fn(&str) -> bool + Send + Sync;

/// Tester that delegates to a caller-supplied closure.
#[derive(Clone)]
pub struct PredicateTester {
    predicate: Arc<PredicateFn>,
}

impl PredicateTester {
    /// Create a new predicate tester from a shared closure.
    #[must_use]
    pub fn new(predicate: Arc<PredicateFn>) -> Self {
        Self { predicate }
    }
}

impl Debug for PredicateTester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PredicateTester")
    }
}

impl Tester for PredicateTester {
    fn test(&self, candidate: &str) -> bool {
        (self.predicate)(candidate)
    }
}
