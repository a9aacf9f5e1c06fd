//! delve - Search and extract data from nested object/array trees
//!
//! "Where in this big nested structure does X appear?" `delve` answers by
//! walking a tree's own keys, testing every key and every String/Number leaf
//! against a needle, and reporting the dotted paths that matched.
//!
//! # Architecture
//!
//! - [`Value`]: The tree node type (objects, arrays, primitives, callables)
//! - [`Needle`]: What to look for: literal, number, predicate, or pattern
//! - [`Tester`]: The single string test a needle compiles to, once per search
//! - [`find`]: The recursive matcher, returning a [`MatchSet`] of dotted paths
//! - [`get_by_path`] / [`copy`]: Path lookup and path copy primitives
//! - [`filter`] / [`flat_filter`]: Projections of a match set: a pruned tree,
//!   or a flat `path → value` map
//!
//! # Key Invariants
//!
//! 1. **Depth budget**: every descent spends one level; a budget of 0 finds
//!    nothing. The budget is the only guard against self-referential input.
//!
//! 2. **Dedup, first wins**: a [`MatchSet`] never holds a path twice, and keeps
//!    the order in which paths were first discovered.
//!
//! 3. **Shape preservation**: [`filter`] rebuilds Arrays as Arrays and Objects
//!    as Objects at every level it recreates.
//!
//! 4. **Absent ≠ undefined**: [`get_by_path`] returns `None` only for a path
//!    that does not exist; a stored [`Value::Undefined`] comes back as
//!    `Some(&Value::Undefined)`. Array slots [`filter`] skips over are
//!    [`Value::Hole`]s and count as absent.
//!
//! # Example
//!
//! ```
//! use delve::prelude::*;
//!
//! let tree = Value::object([
//!     ("str", Value::from("this is string")),
//!     ("int", Value::from(100500)),
//!     ("obj", Value::object([("str", Value::from("another string"))])),
//! ]);
//!
//! let found = find(&tree, &Needle::from("string"), DEFAULT_DEPTH);
//! assert_eq!(found, ["str", "obj.str"]);
//!
//! let flat = flat_filter(&tree, &Needle::from(100), DEFAULT_DEPTH);
//! assert_eq!(flat.get("int"), Some(&Value::from(100500)));
//!
//! assert_eq!(get_by_path(&tree, "obj.str"), Some(&Value::from("another string")));
//! assert_eq!(get_by_path(&tree, "unknown.path"), None);
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod copy;
mod find;
mod needle;
mod path;
mod projection;
mod tester;
mod trace;
mod tree_search;
mod value;

#[cfg(feature = "serde")]
mod config;
#[cfg(feature = "serde")]
mod convert;
#[cfg(feature = "serde")]
mod needle_spec;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use find::{find, MatchSet};
pub use needle::Needle;
pub use path::{get_by_path, get_by_path_with, EmptyPath, Path};
pub use tree_search::TreeSearch;
pub use value::{number_to_string, Callable, CallableFn, Entries, Object, Value};

// Path copy and projections
pub use copy::copy;
pub use projection::{filter, flat_filter, flatten, prune, FlatMatches};

// Testers
pub use tester::{PatternTester, PredicateFn, PredicateTester, SubstringTester, Tester};

// Trace types
pub use trace::{find_with_trace, SearchTrace, TraceStep};

// Config (feature-gated)
#[cfg(feature = "serde")]
pub use config::{SearchConfig, SearchMode};
#[cfg(feature = "serde")]
pub use needle_spec::NeedleSpec;

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use delve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Operations
        copy,
        filter,
        find,
        find_with_trace,
        flat_filter,
        get_by_path,
        // Core types
        FlatMatches,
        MatchSet,
        Needle,
        Path,
        // Errors
        SearchError,
        SearchTrace,
        Tester,
        TreeSearch,
        Value,
        DEFAULT_DEPTH,
    };

    #[cfg(feature = "serde")]
    pub use crate::{NeedleSpec, SearchConfig, SearchMode};
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Depth budget used when the caller does not pick one.
pub const DEFAULT_DEPTH: usize = 3;

/// Maximum depth budget accepted from configuration.
///
/// Direct calls to [`find`] take any budget; configuration loaded from files
/// is validated against this limit via `SearchConfig::validate`.
pub const MAX_SEARCH_DEPTH: usize = 64;

/// Maximum length for literal needle patterns loaded from configuration.
pub const MAX_PATTERN_LENGTH: usize = 8192;

/// Maximum length for regex patterns.
///
/// Regex compilation is expensive even with the linear-time Rust `regex` crate.
/// Shorter limit than [`MAX_PATTERN_LENGTH`] because regex complexity scales
/// faster than literal matching.
pub const MAX_REGEX_PATTERN_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from needle construction and configuration loading.
///
/// Searches themselves never fail: a missing path, a leaf root or an
/// exhausted depth budget all produce ordinary (possibly empty) results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A value of this kind cannot be used as a needle.
    #[error("a {kind} value cannot be used as a needle; expected a string, number, or function")]
    InvalidArgument {
        /// Kind of the rejected value (see [`Value::type_name`]).
        kind: &'static str,
    },

    /// A regex pattern failed to compile.
    #[error("invalid pattern \"{pattern}\": {reason}")]
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        reason: String,
    },

    /// A pattern exceeds the maximum allowed length.
    #[error("pattern length is {len}, but maximum allowed is {max}")]
    PatternTooLong {
        /// Actual length of the pattern.
        len: usize,
        /// Maximum allowed length.
        max: usize,
    },

    /// A configured depth budget exceeds [`MAX_SEARCH_DEPTH`].
    #[error("search depth is {depth}, but maximum allowed is {max}")]
    DepthExceeded {
        /// Configured depth.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },

    /// Configuration deserialization failed.
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// The underlying error message.
        reason: String,
    },
}
