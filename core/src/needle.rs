//! `Needle`: What a search looks for
//!
//! A needle is one of four kinds. Each compiles to exactly one
//! [`Tester`](crate::Tester), once per search call:
//!
//! | Needle | Tester |
//! |--------|--------|
//! | [`Needle::Literal`] | [`SubstringTester`] |
//! | [`Needle::Number`] | [`SubstringTester`] over the number's string form |
//! | [`Needle::Pattern`] | [`PatternTester`] |
//! | [`Needle::Predicate`] | [`PredicateTester`] |

use crate::{
    number_to_string, PatternTester, PredicateFn, PredicateTester, SearchError, SubstringTester,
    Tester, Value, MAX_REGEX_PATTERN_LENGTH,
};
use std::fmt;
use std::sync::Arc;

/// The search target.
///
/// # Example
///
/// ```
/// use delve::{find, Needle, Value, DEFAULT_DEPTH};
///
/// let tree = Value::object([("user_id", Value::from(42)), ("name", Value::from("bob"))]);
///
/// assert_eq!(find(&tree, &Needle::from("id"), DEFAULT_DEPTH), ["user_id"]);
/// assert_eq!(find(&tree, &Needle::from(42), DEFAULT_DEPTH), ["user_id"]);
/// assert_eq!(find(&tree, &Needle::pattern("^b").unwrap(), DEFAULT_DEPTH), ["name"]);
/// assert_eq!(
///     find(&tree, &Needle::predicate(|s| s == "name"), DEFAULT_DEPTH),
///     ["name"],
/// );
/// ```
#[derive(Clone)]
pub enum Needle {
    /// Case-sensitive substring.
    Literal(String),

    /// Number, matched as a substring of stringified keys and leaves.
    Number(f64),

    /// Caller-supplied test. Receives the key for key tests and the
    /// stringified leaf for value tests.
    Predicate(Arc<PredicateFn>),

    /// Regular expression, searched unanchored.
    Pattern(regex::Regex),
}

impl Needle {
    /// A literal substring needle.
    pub fn literal(needle: impl Into<String>) -> Self {
        Self::Literal(needle.into())
    }

    /// A numeric needle.
    #[must_use]
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// A predicate needle.
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Predicate(Arc::new(predicate))
    }

    /// A pattern needle.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PatternTooLong`] if the pattern exceeds
    /// [`MAX_REGEX_PATTERN_LENGTH`], or [`SearchError::InvalidPattern`] if
    /// it does not compile.
    pub fn pattern(pattern: &str) -> Result<Self, SearchError> {
        compile_pattern(pattern).map(Self::Pattern)
    }

    /// Convert a host value into a needle.
    ///
    /// Strings become literals, numbers stay numbers, and callables become
    /// predicates (the callable receives the candidate as a string value and
    /// its result is judged by truthiness).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidArgument`] for any other kind of value.
    ///
    /// ```
    /// use delve::{Needle, SearchError, Value};
    ///
    /// assert!(Needle::from_value(&Value::from("x")).is_ok());
    /// assert!(matches!(
    ///     Needle::from_value(&Value::Bool(true)),
    ///     Err(SearchError::InvalidArgument { kind: "bool" }),
    /// ));
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, SearchError> {
        match value {
            Value::String(s) => Ok(Self::Literal(s.clone())),
            Value::Number(n) => Ok(Self::Number(*n)),
            Value::Function(callable) => {
                let callable = callable.clone();
                Ok(Self::predicate(move |candidate| {
                    callable
                        .call(&Value::String(candidate.to_string()))
                        .is_truthy()
                }))
            }
            other => Err(SearchError::InvalidArgument {
                kind: other.type_name(),
            }),
        }
    }

    /// Compile this needle into its tester.
    #[must_use]
    pub fn tester(&self) -> Box<dyn Tester> {
        match self {
            Self::Literal(s) => Box::new(SubstringTester::new(s.as_str())),
            Self::Number(n) => Box::new(SubstringTester::new(number_to_string(*n))),
            Self::Predicate(p) => Box::new(PredicateTester::new(Arc::clone(p))),
            Self::Pattern(re) => Box::new(PatternTester::new(re.clone())),
        }
    }

    /// Returns a short name for the needle's kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Number(_) => "number",
            Self::Predicate(_) => "predicate",
            Self::Pattern(_) => "pattern",
        }
    }
}

pub(crate) fn compile_pattern(pattern: &str) -> Result<regex::Regex, SearchError> {
    if pattern.len() > MAX_REGEX_PATTERN_LENGTH {
        return Err(SearchError::PatternTooLong {
            len: pattern.len(),
            max: MAX_REGEX_PATTERN_LENGTH,
        });
    }
    regex::Regex::new(pattern).map_err(|e| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

impl fmt::Debug for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Self::Predicate(_) => f.write_str("Predicate"),
            Self::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
        }
    }
}

impl fmt::Display for Needle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "\"{s}\""),
            Self::Number(n) => f.write_str(&number_to_string(*n)),
            Self::Predicate(_) => f.write_str("<predicate>"),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

impl From<&str> for Needle {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for Needle {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<f64> for Needle {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Needle {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Needle {
    #[allow(clippy::cast_precision_loss)] // numbers are doubles in this model
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<regex::Regex> for Needle {
    fn from(re: regex::Regex) -> Self {
        Self::Pattern(re)
    }
}

impl TryFrom<&Value> for Needle {
    type Error = SearchError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
