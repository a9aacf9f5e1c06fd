//! delve-test: Reference trees and conformance fixtures for delve
//!
//! Provides the reference tree the search semantics are pinned against, plus
//! (feature `fixtures`) a YAML fixture runner for data-driven cases.
//!
//! # Example
//!
//! ```
//! use delve_test::prelude::*;
//!
//! let obj = reference_tree();
//! assert_eq!(find(&obj, &Needle::from("fn"), DEFAULT_DEPTH), ["fn", "obj.fn"]);
//! ```

use delve::{Callable, Value};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// The mixed array shared by both levels of [`reference_tree`]:
/// `[fn, 1, 1.5, true, false, null, undefined, ["string"], {some: "string"}]`.
#[must_use]
pub fn reference_array(func: &Callable) -> Value {
    Value::array([
        Value::Function(func.clone()),
        Value::from(1),
        Value::from(1.5),
        Value::from(true),
        Value::from(false),
        Value::Null,
        Value::Undefined,
        Value::array([Value::from("string")]),
        Value::object([("some", Value::from("string"))]),
    ])
}

/// The reference tree.
///
/// ```text
/// {
///   fn, str: "this is string", int: 100500, float: 100.5,
///   false: false, true: true, null: null, undef: undefined,
///   array: [...],
///   obj: { ...same shape..., obj: { obj: { str: "deeply hidden string" } } }
/// }
/// ```
///
/// Both levels hold clones of one [`Callable`], so `fn` values compare equal
/// across the tree.
#[must_use]
pub fn reference_tree() -> Value {
    let func = Callable::named("fn", |_| Value::Undefined);

    let mut inner = level(&func);
    inner.set(
        "obj",
        Value::object([(
            "obj",
            Value::object([("str", Value::from("deeply hidden string"))]),
        )]),
    );

    let mut outer = level(&func);
    outer.set("obj", inner);
    outer
}

fn level(func: &Callable) -> Value {
    Value::object([
        ("fn", Value::Function(func.clone())),
        ("str", Value::from("this is string")),
        ("int", Value::from(100_500)),
        ("float", Value::from(100.5)),
        ("false", Value::from(false)),
        ("true", Value::from(true)),
        ("null", Value::Null),
        ("undef", Value::Undefined),
        ("array", reference_array(func)),
    ])
}

/// A chain of single-key objects `levels` deep, ending in a string leaf:
/// `{next: {next: ... {leaf: "bottom"}}}`.
#[must_use]
pub fn chain(levels: usize) -> Value {
    (0..levels).fold(
        Value::object([("leaf", Value::from("bottom"))]),
        |node, _| Value::object([("next", node)]),
    )
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{chain, reference_array, reference_tree};
    pub use delve::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve::get_by_path;

    #[test]
    fn reference_tree_shape() {
        let obj = reference_tree();
        assert_eq!(
            get_by_path(&obj, "obj.obj.obj.str"),
            Some(&Value::from("deeply hidden string"))
        );
        assert_eq!(get_by_path(&obj, "undef"), Some(&Value::Undefined));
        assert_eq!(get_by_path(&obj, "array.6"), Some(&Value::Undefined));
        assert_eq!(get_by_path(&obj, "fn"), get_by_path(&obj, "obj.fn"));
    }

    #[test]
    fn chain_depth() {
        let value = chain(2);
        assert_eq!(
            get_by_path(&value, "next.next.leaf"),
            Some(&Value::from("bottom"))
        );
        assert_eq!(get_by_path(&value, "next.leaf"), None);
    }
}
