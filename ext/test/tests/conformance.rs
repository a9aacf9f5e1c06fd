//! Conformance tests that run YAML fixtures against delve
//!
//! Run with: cargo test -p delve-test --test conformance
//!
//! Note: This test file requires the `fixtures` feature (on by default).

#![cfg(feature = "fixtures")]

use delve_test::fixture::Fixture;
use std::fs;
use std::path::{Path, PathBuf};

/// The `fixtures/` directory at the workspace root
fn fixtures_dir() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");

    // Go up: ext/test -> ext -> workspace root
    Path::new(manifest_dir)
        .parent()
        .and_then(Path::parent)
        .expect("could not find workspace root")
        .join("fixtures")
}

/// Load and run one fixture file (possibly several `---` documents)
fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));

    let fixtures = Fixture::from_yaml_multi(&yaml).unwrap_or_else(|e| {
        panic!("Failed to parse {}: {}", path.display(), e);
    });
    assert!(!fixtures.is_empty(), "{} holds no fixtures", path.display());

    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_find() {
    run_fixture_file("01_find.yaml");
}

#[test]
fn test_depth() {
    run_fixture_file("02_depth.yaml");
}

#[test]
fn test_projections() {
    run_fixture_file("03_projections.yaml");
}

#[test]
fn test_needle_strategies() {
    run_fixture_file("04_needles.yaml");
}

#[test]
fn every_fixture_file_is_covered() {
    let mut names: Vec<String> = fs::read_dir(fixtures_dir())
        .expect("read dir")
        .filter_map(|entry| {
            let path = entry.expect("dir entry").path();
            path.extension()
                .is_some_and(|e| e == "yaml" || e == "yml")
                .then(|| path.file_name().map(|n| n.to_string_lossy().into_owned()))
                .flatten()
        })
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["01_find.yaml", "02_depth.yaml", "03_projections.yaml", "04_needles.yaml"]
    );
}
