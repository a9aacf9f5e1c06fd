//! `NeedleSpec`: Config-level needle specification
//!
//! This type represents a user's *intent* for a search ("keys or values
//! containing `error`, ignoring case"). It compiles to a runtime
//! [`Needle`] via [`to_needle()`](NeedleSpec::to_needle).
//!
//! # Naming: Spec vs Needle
//!
//! - [`NeedleSpec`] = config-level specification (what the user wrote)
//! - [`Needle`] = runtime search target (what the walk tests with)

use crate::needle::compile_pattern;
use crate::{Needle, SearchError, MAX_PATTERN_LENGTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A needle specification from user configuration.
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```json
/// { "type": "contains", "value": "error", "ignore_case": true }
/// { "type": "regex", "value": "^user-\\d+$" }
/// { "type": "number", "value": 100 }
/// ```
///
/// # Example
///
/// ```
/// use delve::{find, NeedleSpec, Value};
///
/// let spec: NeedleSpec =
///     serde_json::from_str(r#"{ "type": "prefix", "value": "user_" }"#).unwrap();
/// let needle = spec.to_needle().unwrap();
///
/// let tree = Value::object([("user_id", Value::from(1)), ("id", Value::from(2))]);
/// assert_eq!(find(&tree, &needle, 3), ["user_id"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NeedleSpec {
    /// Substring containment.
    Contains {
        /// The substring.
        value: String,
        /// ASCII case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// Whole-string equality.
    Exact {
        /// The expected string.
        value: String,
        /// ASCII case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// String starts with a prefix.
    Prefix {
        /// The prefix.
        value: String,
        /// ASCII case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// String ends with a suffix.
    Suffix {
        /// The suffix.
        value: String,
        /// ASCII case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// Regular expression search (Rust `regex` crate syntax, linear time).
    Regex {
        /// The pattern.
        value: String,
        /// Case-insensitive matching (default: false).
        #[serde(default)]
        ignore_case: bool,
    },
    /// Number, matched as a substring of stringified keys and leaves.
    Number {
        /// The number.
        value: f64,
    },
}

impl NeedleSpec {
    /// A case-sensitive `contains` spec.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Contains {
            value: value.into(),
            ignore_case: false,
        }
    }

    /// A case-sensitive `regex` spec.
    pub fn regex(value: impl Into<String>) -> Self {
        Self::Regex {
            value: value.into(),
            ignore_case: false,
        }
    }

    /// Compile this spec into a runtime [`Needle`].
    ///
    /// Case-sensitive `contains` compiles to [`Needle::Literal`], `regex` to
    /// [`Needle::Pattern`] (prefixed with `(?i)` when ignoring case), `number`
    /// to [`Needle::Number`]; every other string strategy compiles to a
    /// [`Needle::Predicate`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::PatternTooLong`] if a pattern exceeds its length
    /// limit, or [`SearchError::InvalidPattern`] if the regex is invalid.
    pub fn to_needle(&self) -> Result<Needle, SearchError> {
        if let Some(value) = self.literal_value() {
            if value.len() > MAX_PATTERN_LENGTH {
                return Err(SearchError::PatternTooLong {
                    len: value.len(),
                    max: MAX_PATTERN_LENGTH,
                });
            }
        }

        let needle = match self {
            Self::Contains {
                value,
                ignore_case: false,
            } => Needle::literal(value.as_str()),
            Self::Contains {
                value,
                ignore_case: true,
            } => {
                let value = value.to_ascii_lowercase();
                Needle::predicate(move |s| s.to_ascii_lowercase().contains(value.as_str()))
            }
            Self::Exact { value, ignore_case } => {
                let (value, ignore_case) = (value.clone(), *ignore_case);
                Needle::predicate(move |s| {
                    if ignore_case {
                        s.eq_ignore_ascii_case(&value)
                    } else {
                        s == value
                    }
                })
            }
            Self::Prefix { value, ignore_case } => {
                let (value, ignore_case) = (value.clone(), *ignore_case);
                Needle::predicate(move |s| {
                    if ignore_case {
                        s.get(..value.len())
                            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(&value))
                    } else {
                        s.starts_with(value.as_str())
                    }
                })
            }
            Self::Suffix { value, ignore_case } => {
                let (value, ignore_case) = (value.clone(), *ignore_case);
                Needle::predicate(move |s| {
                    if ignore_case {
                        s.len()
                            .checked_sub(value.len())
                            .and_then(|start| s.get(start..))
                            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(&value))
                    } else {
                        s.ends_with(value.as_str())
                    }
                })
            }
            Self::Regex { value, ignore_case } => {
                let pattern = if *ignore_case {
                    format!("(?i){value}")
                } else {
                    value.clone()
                };
                Needle::Pattern(compile_pattern(&pattern)?)
            }
            Self::Number { value } => Needle::Number(*value),
        };
        Ok(needle)
    }

    fn literal_value(&self) -> Option<&str> {
        match self {
            Self::Contains { value, .. }
            | Self::Exact { value, .. }
            | Self::Prefix { value, .. }
            | Self::Suffix { value, .. } => Some(value.as_str()),
            Self::Regex { .. } | Self::Number { .. } => None,
        }
    }
}

impl fmt::Display for NeedleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, value, ignore_case) = match self {
            Self::Contains { value, ignore_case } => ("Contains", value, *ignore_case),
            Self::Exact { value, ignore_case } => ("Exact", value, *ignore_case),
            Self::Prefix { value, ignore_case } => ("Prefix", value, *ignore_case),
            Self::Suffix { value, ignore_case } => ("Suffix", value, *ignore_case),
            Self::Regex { value, ignore_case } => ("Regex", value, *ignore_case),
            Self::Number { value } => {
                return write!(f, "Number({})", crate::number_to_string(*value));
            }
        };
        if ignore_case {
            write!(f, "{name}(\"{value}\", ignore_case)")
        } else {
            write!(f, "{name}(\"{value}\")")
        }
    }
}
