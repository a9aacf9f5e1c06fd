//! Config types for file-driven searches.
//!
//! A [`SearchConfig`] is the serde-deserializable form of one search: which
//! needle, how deep, and which projection to return. It deserializes from
//! JSON or YAML (YAML callers go through `serde_json::Value`) and runs
//! against a [`Value`] via [`SearchConfig::run`].
//!
//! ```yaml
//! needle:
//!   type: contains
//!   value: string
//! depth: 4
//! mode: flat
//! ```

use crate::{
    filter, find, flat_filter, NeedleSpec, SearchError, Value, DEFAULT_DEPTH, MAX_SEARCH_DEPTH,
};
use serde::{Deserialize, Serialize};

/// Which result a configured search produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// The list of matching paths ([`find`]).
    #[default]
    Find,
    /// The pruned tree ([`filter`]).
    Filter,
    /// The flat `path → value` map ([`flat_filter`]).
    Flat,
}

/// Configuration for one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// What to look for.
    pub needle: NeedleSpec,

    /// Depth budget (default: [`DEFAULT_DEPTH`]).
    #[serde(default = "default_depth")]
    pub depth: usize,

    /// Which projection to return (default: `find`).
    #[serde(default)]
    pub mode: SearchMode,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

impl SearchConfig {
    /// A `find` search at the default depth.
    #[must_use]
    pub fn new(needle: NeedleSpec) -> Self {
        Self {
            needle,
            depth: DEFAULT_DEPTH,
            mode: SearchMode::Find,
        }
    }

    /// Parse a config from JSON text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidConfig`] if the text does not
    /// deserialize, or [`SearchError::DepthExceeded`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let config: Self = serde_json::from_str(json).map_err(|e| SearchError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from an already-parsed JSON/YAML document and validate it.
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_value(value: serde_json::Value) -> Result<Self, SearchError> {
        let config: Self =
            serde_json::from_value(value).map_err(|e| SearchError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check limits that deserialization cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::DepthExceeded`] if `depth` is above
    /// [`MAX_SEARCH_DEPTH`].
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.depth > MAX_SEARCH_DEPTH {
            return Err(SearchError::DepthExceeded {
                depth: self.depth,
                max: MAX_SEARCH_DEPTH,
            });
        }
        Ok(())
    }

    /// Run the configured search against `root`.
    ///
    /// `find` results come back as an Array of path strings, `filter` as the
    /// pruned tree, `flat` as an Object keyed by dotted path.
    ///
    /// # Errors
    ///
    /// Returns an error if the needle fails to compile or the config is
    /// invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use delve::{SearchConfig, Value};
    ///
    /// let config = SearchConfig::from_json(
    ///     r#"{ "needle": { "type": "contains", "value": "hit" }, "mode": "flat" }"#,
    /// ).unwrap();
    /// let tree = Value::object([("a", Value::from("hit")), ("b", Value::from("miss"))]);
    ///
    /// assert_eq!(
    ///     config.run(&tree).unwrap(),
    ///     Value::object([("a", Value::from("hit"))]),
    /// );
    /// ```
    pub fn run(&self, root: &Value) -> Result<Value, SearchError> {
        self.validate()?;
        let needle = self.needle.to_needle()?;
        tracing::debug!(needle = %self.needle, depth = self.depth, mode = ?self.mode, "run search config");

        let result = match self.mode {
            SearchMode::Find => Value::Array(
                find(root, &needle, self.depth)
                    .into_iter()
                    .map(Value::String)
                    .collect(),
            ),
            SearchMode::Filter => filter(root, &needle, self.depth),
            SearchMode::Flat => flat_filter(root, &needle, self.depth).into_value(),
        };
        Ok(result)
    }
}
