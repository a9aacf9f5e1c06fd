//! Conversions between [`Value`] and serde data (feature = `"serde"`)
//!
//! Ingesting JSON/YAML goes through `serde_json::Value`: YAML documents
//! deserialize into it directly, so one conversion covers both formats.
//!
//! Going the other way, `Value` implements [`Serialize`] with the usual
//! JSON-printing conventions for values JSON cannot express:
//!
//! | Value | In an object | In an array / at the root |
//! |-------|--------------|---------------------------|
//! | `Undefined`, `Hole`, `Function` | key omitted | `null` |
//! | `NaN`, `±Infinity` | `null` | `null` |

use crate::{Object, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect::<Object>(),
            ),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null | Value::Undefined | Value::Hole | Value::Function(_) => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .filter(|(_, v)| is_representable(v))
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

/// Integral doubles within the exact range become JSON integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_to_json(n: f64) -> serde_json::Value {
    const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if n.fract() == 0.0 && n.abs() <= EXACT {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}

fn is_representable(value: &Value) -> bool {
    !matches!(value, Value::Undefined | Value::Hole | Value::Function(_))
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::Undefined | Self::Hole | Self::Function(_) => {
                serializer.serialize_unit()
            }
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => number_to_json(*n).serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(None)?;
                for (k, v) in map.iter().filter(|(_, v)| is_representable(v)) {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl Serialize for crate::MatchSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl Serialize for crate::FlatMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (path, value) in self.iter() {
            out.serialize_entry(path, &value.unwrap_or(&Value::Undefined))?;
        }
        out.end()
    }
}
