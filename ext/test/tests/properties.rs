//! Search properties checked against the reference tree and synthetic chains.

use delve::{Needle, Path, SearchError, TreeSearch};
use delve_test::prelude::*;

fn needles() -> Vec<Needle> {
    vec![
        Needle::from("string"),
        Needle::from("fn"),
        Needle::from("o"),
        Needle::from(""),
        Needle::from(100),
        Needle::from(1.5),
        Needle::pattern(r"^\d$").unwrap(),
        Needle::predicate(|s| s.len() > 4),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// Reference scenarios
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn find_nothing() {
    assert!(reference_tree().find("nothing").is_empty());
}

#[test]
fn find_keys_by_string_pattern_and_predicate() {
    let obj = reference_tree();
    assert_eq!(obj.find("fn"), ["fn", "obj.fn"]);
    assert_eq!(obj.find(Needle::pattern("fn").unwrap()), ["fn", "obj.fn"]);
    assert_eq!(obj.find(Needle::predicate(|s| s == "fn")), ["fn", "obj.fn"]);
}

#[test]
fn find_host_callable_as_needle() {
    let obj = reference_tree();
    let callable = Value::function(|v| Value::from(v.as_str() == Some("fn")));
    let needle = Needle::from_value(&callable).unwrap();
    assert_eq!(obj.find(needle), ["fn", "obj.fn"]);
}

#[test]
fn non_needle_values_are_rejected() {
    assert_eq!(
        Needle::from_value(&Value::Bool(true)).unwrap_err(),
        SearchError::InvalidArgument { kind: "bool" }
    );
    assert!(Needle::from_value(&Value::Null).is_err());
    assert!(Needle::from_value(&Value::array([])).is_err());
}

#[test]
fn find_values_at_default_depth() {
    assert_eq!(
        reference_tree().find("string"),
        ["str", "array.7.0", "array.8.some", "obj.str"]
    );
}

#[test]
fn find_values_deeper() {
    assert_eq!(
        reference_tree().find_depth("string", 4),
        [
            "str",
            "array.7.0",
            "array.8.some",
            "obj.str",
            "obj.array.7.0",
            "obj.array.8.some",
            "obj.obj.obj.str",
        ]
    );
}

#[test]
fn find_by_number() {
    assert_eq!(
        reference_tree().find(100),
        ["int", "float", "obj.int", "obj.float"]
    );
}

#[test]
fn filter_keeps_functions() {
    let obj = reference_tree();
    let func = obj.get("fn").cloned().unwrap();
    assert!(func.is_function());

    assert_eq!(
        obj.filter("fn"),
        Value::object([
            ("fn", func.clone()),
            ("obj", Value::object([("fn", func)])),
        ])
    );
}

#[test]
fn get_by_path_scenarios() {
    let obj = reference_tree();
    assert_eq!(obj.get_by_path("array.7.0"), Some(&Value::from("string")));
    assert_eq!(obj.get_by_path("unknown.path"), None);
    assert_eq!(obj.get_by_path("undef"), Some(&Value::Undefined));
    assert_eq!(obj.get_by_path("obj.array.6"), Some(&Value::Undefined));
}

// ═══════════════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn no_duplicate_paths() {
    let obj = reference_tree();
    for needle in needles() {
        for depth in 1..=6 {
            let found = find(&obj, &needle, depth);
            let mut sorted = found.to_vec();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), found.len(), "{needle} at depth {depth}");
        }
    }
}

#[test]
fn find_is_idempotent() {
    let obj = reference_tree();
    for needle in needles() {
        assert_eq!(
            find(&obj, &needle, 4),
            find(&obj, &needle, 4),
            "{needle}"
        );
    }
}

#[test]
fn find_is_monotonic_in_depth() {
    let obj = reference_tree();
    for needle in needles() {
        for depth in 0..6 {
            let shallow = find(&obj, &needle, depth);
            let deep = find(&obj, &needle, depth + 1);
            for path in &shallow {
                assert!(
                    deep.contains(path),
                    "{needle}: {path} found at depth {depth} but not {}",
                    depth + 1
                );
            }
        }
    }
}

#[test]
fn depth_zero_is_always_empty() {
    let obj = reference_tree();
    for needle in needles() {
        assert!(find(&obj, &needle, 0).is_empty(), "{needle}");
    }
}

#[test]
fn flat_filter_keys_equal_find() {
    let obj = reference_tree();
    for needle in needles() {
        for depth in 1..=5 {
            let found = find(&obj, &needle, depth);
            let flat = flat_filter(&obj, &needle, depth);
            assert_eq!(
                flat.keys().collect::<Vec<_>>(),
                found.iter().map(String::as_str).collect::<Vec<_>>(),
                "{needle} at depth {depth}"
            );
        }
    }
}

#[test]
fn flat_filter_agrees_with_get_by_path() {
    let obj = reference_tree();
    for needle in needles() {
        let flat = flat_filter(&obj, &needle, 5);
        for (path, value) in flat.iter() {
            assert_eq!(value, get_by_path(&obj, path), "{needle}: {path}");
            assert!(value.is_some(), "{needle}: {path} did not resolve");
        }
    }
}

#[test]
fn filter_contains_every_found_path() {
    let obj = reference_tree();
    for needle in needles() {
        let pruned = filter(&obj, &needle, 4);
        for path in &find(&obj, &needle, 4) {
            assert_eq!(
                get_by_path(&pruned, path.as_str()),
                get_by_path(&obj, path.as_str()),
                "{needle}: {path}"
            );
        }
    }
}

#[test]
fn filter_preserves_array_shape() {
    let obj = reference_tree();
    let pruned = filter(&obj, &Needle::from("string"), 3);
    let array = pruned.get("array").and_then(Value::as_array).unwrap();
    assert_eq!(array.len(), 9);
    assert!(array[..7].iter().all(Value::is_hole));
    assert_eq!(array[7], Value::array([Value::from("string")]));
    assert_eq!(pruned.get_by_path("array.6"), None);
}

#[test]
fn searching_pruned_tree_finds_nothing_new() {
    let obj = reference_tree();
    for needle in needles() {
        for depth in 1..=5 {
            let found = find(&obj, &needle, depth);
            let pruned = filter(&obj, &needle, depth);
            for path in &find(&pruned, &needle, depth) {
                assert!(
                    found.contains(path),
                    "{needle} at depth {depth}: {path} only found in the pruned tree"
                );
            }
        }
    }
}

#[test]
fn copy_round_trips_found_paths() {
    let obj = reference_tree();
    let mut to = Value::object::<&str, _>([]);
    for path in &find(&obj, &Needle::from("string"), 4) {
        copy(&obj, &mut to, &Path::parse(path));
    }
    assert_eq!(to, filter(&obj, &Needle::from("string"), 4));
}

#[test]
fn trace_matches_find() {
    let obj = reference_tree();
    for needle in needles() {
        for depth in 0..=5 {
            let trace = find_with_trace(&obj, &needle, depth);
            assert_eq!(trace.matches, find(&obj, &needle, depth), "{needle}");
        }
    }
}

#[test]
fn chain_needs_one_level_per_object() {
    for levels in 0..8 {
        let value = chain(levels);
        let needle = Needle::from("bottom");
        assert!(find(&value, &needle, levels).is_empty());

        let found = find(&value, &needle, levels + 1);
        let expected = std::iter::repeat("next")
            .take(levels)
            .chain(["leaf"])
            .collect::<Vec<_>>()
            .join(".");
        assert_eq!(found, [expected.as_str()]);
    }
}
