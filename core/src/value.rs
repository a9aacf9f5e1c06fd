//! `Value`: The tree node type every search walks over
//!
//! A `Value` is built once when host data is ingested (from JSON, YAML, or by
//! hand) and is read-only from the search's perspective. Containers are
//! [`Value::Object`] (insertion-ordered) and [`Value::Array`]; everything else
//! is a leaf.
//!
//! # Leaves that get searched
//!
//! Only [`Value::String`] and [`Value::Number`] leaves are tested against a
//! needle. Booleans, nulls, `Undefined` and callables are carried along
//! (and copied by `filter`) but never matched by value.
//!
//! # Holes
//!
//! An array slot that was never assigned is a [`Value::Hole`]. A hole keeps
//! the array's length but is not an own key: [`Value::get`],
//! [`Value::has_own`] and [`Value::entries`] all skip it. A stored
//! `Undefined` is a real entry.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered map backing [`Value::Object`].
pub type Object = IndexMap<String, Value>;

/// Signature of a callable leaf.
pub type CallableFn = dyn Fn(&Value) -> Value + Send + Sync;

/// A callable leaf value.
///
/// Callables are opaque to the search: they are never matched by value, but
/// their keys are, and `filter` copies them into the pruned tree. Two
/// callables are equal only when they share the same allocation.
///
/// # Example
///
/// ```
/// use delve::{Callable, Value};
///
/// let double = Callable::new(|v| Value::from(v.as_f64().unwrap_or(0.0) * 2.0));
/// assert_eq!(double.call(&Value::from(21)), Value::from(42));
/// ```
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wrap a closure as an anonymous callable.
    pub fn new(func: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: None,
            func: Arc::new(func),
        }
    }

    /// Wrap a closure as a named callable (the name only shows up in `Debug`).
    pub fn named(
        name: impl Into<String>,
        func: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: Some(name.into()),
            func: Arc::new(func),
        }
    }

    /// A callable that ignores its argument and returns `Undefined`.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_| Value::Undefined)
    }

    /// Invoke the callable.
    pub fn call(&self, arg: &Value) -> Value {
        (self.func)(arg)
    }

    /// The callable's name, if it was given one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "[Function: {name}]"),
            None => f.write_str("[Function]"),
        }
    }
}

/// A node of a searchable tree.
///
/// # Example
///
/// ```
/// use delve::Value;
///
/// let tree = Value::object([
///     ("name", Value::from("alice")),
///     ("tags", Value::array(["admin".into(), "ops".into()])),
/// ]);
/// assert!(tree.is_container());
/// assert_eq!(tree.get("name").and_then(Value::as_str), Some("alice"));
/// assert_eq!(tree.get("tags").and_then(|t| t.get("1")), Some(&Value::from("ops")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// An explicit null.
    Null,

    /// A key that exists but holds no value.
    #[default]
    Undefined,

    /// An unassigned array slot. Never an own key.
    Hole,

    /// Boolean leaf.
    Bool(bool),

    /// Numeric leaf. Integers and floats share one representation.
    Number(f64),

    /// String leaf.
    String(String),

    /// Callable leaf.
    Function(Callable),

    /// Insertion-ordered mapping from string keys to values.
    Object(Object),

    /// Ordered sequence of values, keyed by stringified index.
    Array(Vec<Value>),
}

impl Value {
    /// Build an object from `(key, value)` pairs, keeping their order.
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build an array from its items.
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Build a callable leaf.
    pub fn function(func: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Self::Function(Callable::new(func))
    }

    /// An empty container of the same kind as `self`.
    ///
    /// Arrays produce an empty array; every other kind produces an empty object.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        match self {
            Self::Array(_) => Self::Array(Vec::new()),
            _ => Self::Object(Object::new()),
        }
    }

    /// Returns `true` for `Object` and `Array`.
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Returns `true` for leaves that are neither containers nor callables.
    #[inline]
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        !self.is_container() && !self.is_function()
    }

    /// Returns `true` if this is the `Function` variant.
    #[inline]
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns `true` if this is the `Undefined` variant.
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns `true` if this is the `Hole` variant.
    #[inline]
    #[must_use]
    pub fn is_hole(&self) -> bool {
        matches!(self, Self::Hole)
    }

    /// Try to get the value as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get the value as a number.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get the value as an object.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Try to get the value as an array.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Try to get the value as a callable.
    #[inline]
    #[must_use]
    pub fn as_function(&self) -> Option<&Callable> {
        match self {
            Self::Function(c) => Some(c),
            _ => None,
        }
    }

    /// Look up an own key (objects) or a stringified index (arrays).
    ///
    /// Returns `None` for leaves, missing keys, out-of-range indices, holes,
    /// and array keys that are not canonical indices (`"01"`, `"+1"`, `"1.0"`).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let slot = match self {
            Self::Object(map) => map.get(key),
            Self::Array(items) => parse_index(key).and_then(|i| items.get(i)),
            _ => None,
        };
        slot.filter(|v| !v.is_hole())
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let slot = match self {
            Self::Object(map) => map.get_mut(key),
            Self::Array(items) => parse_index(key).and_then(move |i| items.get_mut(i)),
            _ => None,
        };
        slot.filter(|v| !v.is_hole())
    }

    /// Returns `true` if this container directly defines `key`.
    #[must_use]
    pub fn has_own(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`.
    ///
    /// Objects insert (or replace in place, keeping the key's position).
    /// Arrays assign at an existing index or append at `len()`. Returns
    /// `false` (and stores nothing) for leaves, for array keys that are not
    /// indices, and for indices past the end.
    pub fn set(&mut self, key: &str, value: Value) -> bool {
        self.set_within(key, value, 0)
    }

    /// Like [`set`](Self::set), but an array may also grow to `max_len`
    /// slots, with the gap filled by [`Value::Hole`]s.
    pub(crate) fn set_within(&mut self, key: &str, value: Value, max_len: usize) -> bool {
        match self {
            Self::Object(map) => {
                map.insert(key.to_string(), value);
                true
            }
            Self::Array(items) => {
                let Some(index) = parse_index(key) else {
                    return false;
                };
                if index > items.len() && index >= max_len {
                    return false;
                }
                if index >= items.len() {
                    items.resize(index + 1, Value::Hole);
                }
                items[index] = value;
                true
            }
            _ => false,
        }
    }

    /// Iterate a container's own `(key, value)` pairs in natural order.
    ///
    /// Array keys are stringified indices. Holes are skipped and leaves
    /// yield nothing.
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Self::Object(map) => Entries::Object(map.iter()),
            Self::Array(items) => Entries::Array(items.iter().enumerate()),
            _ => Entries::Empty,
        }
    }

    /// The string form a search tests for String and Number leaves.
    ///
    /// Returns `None` for every other variant.
    #[must_use]
    pub fn to_search_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(number_to_string(*n)),
            _ => None,
        }
    }

    /// Loose truthiness: `false`, `0`, `NaN`, `""`, `Null` and `Undefined`
    /// are falsy, everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null | Self::Undefined | Self::Hole => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Function(_) | Self::Object(_) | Self::Array(_) => true,
        }
    }

    /// Returns a string describing the kind of this value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Hole => "hole",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Function(_) => "function",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
        }
    }
}

/// Iterator over a container's own entries. See [`Value::entries`].
pub enum Entries<'a> {
    Object(indexmap::map::Iter<'a, String, Value>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
    Empty,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Object(it) => it
                .find(|(_, v)| !v.is_hole())
                .map(|(k, v)| (k.clone(), v)),
            Self::Array(it) => it
                .find(|(_, v)| !v.is_hole())
                .map(|(i, v)| (i.to_string(), v)),
            Self::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Object(it) => (0, it.size_hint().1),
            Self::Array(it) => (0, it.size_hint().1),
            Self::Empty => (0, Some(0)),
        }
    }
}

/// Parse a canonical array index: ASCII digits, no sign, no leading zeros.
fn parse_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));
    if canonical {
        key.parse().ok()
    } else {
        None
    }
}

/// Format a number the way a dynamic host stringifies it.
///
/// Uses the shortest digits that round-trip. Integral values print without a
/// fractional part (`100500`, not `100500.0`) and negative zero prints as
/// `0`. Magnitudes from `1e21` up, or below `1e-6`, switch to exponent form
/// (`1e+21`, `1.5e-7`). Non-finite values print as `NaN`, `Infinity`,
/// `-Infinity`.
///
/// ```
/// use delve::number_to_string;
///
/// assert_eq!(number_to_string(100500.0), "100500");
/// assert_eq!(number_to_string(100.5), "100.5");
/// assert_eq!(number_to_string(1e21), "1e+21");
/// assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n < 0.0 {
        return format!("-{}", number_to_string(-n));
    }
    if n.is_infinite() {
        return "Infinity".to_string();
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`.
    let scientific = format!("{n:e}");
    let Some((mantissa, exp)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exp) = exp.parse::<i64>() else {
        return scientific;
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    layout_digits(&digits, exp + 1)
}

/// Place the decimal point `point` digits into `digits` (which may be
/// negative or past the end), or fall back to exponent form.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn layout_digits(digits: &str, point: i64) -> String {
    let k = digits.len() as i64;
    if k <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let exp = point - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exp.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exp.abs())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)] // numbers are doubles in this model
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Self::Function(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}
