//! Conformance test fixture runner
//!
//! Loads YAML fixtures and runs them against the delve search operations.
//!
//! ```yaml
//! name: string_values
//! description: String needles match keys and leaves
//! data:
//!   str: this is string
//!   obj: { str: another string }
//! cases:
//!   - name: finds both levels
//!     needle: { type: contains, value: string }
//!     expect: [str, obj.str]
//!     expect_flat: { str: this is string, obj.str: another string }
//! ```

use delve::prelude::*;
use serde::Deserialize;

/// A complete test fixture: one data tree, many cases against it.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub data: serde_json::Value,
    pub cases: Vec<TestCase>,
}

/// Test case
#[derive(Debug, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub needle: NeedleSpec,
    #[serde(default = "default_depth")]
    pub depth: usize,
    /// Expected `find` result, in discovery order.
    pub expect: Vec<String>,
    /// Expected `filter` result, when the case checks it.
    #[serde(default)]
    pub expect_filter: Option<serde_json::Value>,
    /// Expected `flat_filter` result, when the case checks it.
    #[serde(default)]
    pub expect_flat: Option<serde_json::Value>,
}

fn default_depth() -> usize {
    DEFAULT_DEPTH
}

// ═══════════════════════════════════════════════════════════════════════════════
// Runner
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of running a single test case
#[derive(Debug)]
pub struct CaseResult {
    pub case_name: String,
    pub passed: bool,
    /// One line per mismatching projection; empty when the case passed.
    pub failures: Vec<String>,
}

impl Fixture {
    /// Parse a fixture from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Parse multiple fixtures from a YAML file with `---` separators
    pub fn from_yaml_multi(yaml: &str) -> Result<Vec<Self>, serde_yaml::Error> {
        let mut fixtures = Vec::new();
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            fixtures.push(Self::deserialize(doc)?);
        }
        Ok(fixtures)
    }

    /// Run all test cases and return results
    pub fn run(&self) -> Vec<CaseResult> {
        let data = Value::from(self.data.clone());
        self.cases.iter().map(|case| case.run(&data)).collect()
    }

    /// Run all test cases and panic on first failure
    pub fn run_and_assert(&self) {
        for result in self.run() {
            assert!(
                result.passed,
                "Fixture '{}' case '{}' failed:\n  {}",
                self.name,
                result.case_name,
                result.failures.join("\n  ")
            );
        }
    }
}

impl TestCase {
    fn run(&self, data: &Value) -> CaseResult {
        let mut failures = Vec::new();

        match self.needle.to_needle() {
            Ok(needle) => {
                let found = find(data, &needle, self.depth);
                if found != self.expect {
                    failures.push(format!(
                        "find: expected {:?}, got {:?}",
                        self.expect,
                        found.as_slice()
                    ));
                }

                if let Some(expected) = &self.expect_filter {
                    let actual = serde_json::Value::from(filter(data, &needle, self.depth));
                    if &actual != expected {
                        failures.push(format!("filter: expected {expected}, got {actual}"));
                    }
                }

                if let Some(expected) = &self.expect_flat {
                    let flat = flat_filter(data, &needle, self.depth);
                    match serde_json::to_value(&flat) {
                        Ok(actual) if &actual == expected => {}
                        Ok(actual) => {
                            failures.push(format!("flat: expected {expected}, got {actual}"));
                        }
                        Err(e) => failures.push(format!("flat: failed to serialize: {e}")),
                    }
                }
            }
            Err(e) => failures.push(format!("needle {}: {e}", self.needle)),
        }

        CaseResult {
            case_name: self.name.clone(),
            passed: failures.is_empty(),
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r"
name: inline
data:
  a: { b: hit }
  c: [miss, hit]
cases:
  - name: both
    needle: { type: contains, value: hit }
    expect: [a.b, c.1]
    expect_filter: { a: { b: hit }, c: [null, hit] }
    expect_flat: { a.b: hit, c.1: hit }
---
name: second
data: { x: 1 }
cases:
  - name: number
    needle: { type: number, value: 1 }
    depth: 1
    expect: [x]
";

    #[test]
    fn parses_multiple_documents() {
        let fixtures = Fixture::from_yaml_multi(YAML).unwrap();
        assert_eq!(fixtures.len(), 2);
        assert_eq!(fixtures[0].cases[0].depth, DEFAULT_DEPTH);
        assert_eq!(fixtures[1].cases[0].depth, 1);
        for fixture in &fixtures {
            fixture.run_and_assert();
        }
    }

    #[test]
    fn reports_mismatches() {
        let fixture = Fixture::from_yaml(
            "name: wrong\ndata: { a: hit }\ncases:\n  - name: c\n    needle: { type: contains, value: hit }\n    expect: [b]\n",
        )
        .unwrap();
        let results = fixture.run();
        assert!(!results[0].passed);
        assert_eq!(results[0].failures.len(), 1);
        assert!(results[0].failures[0].starts_with("find:"));
    }

    #[test]
    fn bad_needle_is_a_failure_not_a_panic() {
        let fixture = Fixture::from_yaml(
            "name: bad\ndata: {}\ncases:\n  - name: c\n    needle: { type: regex, value: '(' }\n    expect: []\n",
        )
        .unwrap();
        assert!(!fixture.run()[0].passed);
    }
}
