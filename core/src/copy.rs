//! Path copier: builds pruned trees one path at a time
//!
//! [`copy`] moves the value found at a path in a source tree into the same
//! location of a destination tree. Intermediate containers are created with
//! the same kind (Array vs Object) as the source, so a pruned tree keeps the
//! shape of the tree it was cut from. Containers already present in the
//! destination are merged into, which lets [`filter`](crate::filter) fold
//! many paths into one result without clobbering siblings.

use crate::{Path, Value};

/// Copy the value at `path` in `from` into the same location in `to`.
///
/// - `to` must be an Object or Array; otherwise nothing happens.
/// - If `from` does not directly define the next segment, nothing happens.
/// - Primitive and callable values are assigned directly.
/// - If `to` already holds a container at the segment, the rest of the path
///   is copied into it.
/// - At the last segment, the whole sub-value is assigned.
/// - Otherwise an empty container of the source's kind is created and the
///   rest of the path is copied into it.
///
/// `from` is never modified. A destination array grows at most to the
/// length of the source array being copied from; the skipped slots are
/// [`Value::Hole`]s, so they stay absent in the result.
///
/// # Example
///
/// ```
/// use delve::{copy, Path, Value};
///
/// let from = Value::object([(
///     "list",
///     Value::array([Value::from("a"), Value::from("b")]),
/// )]);
/// let mut to = Value::object::<&str, _>([]);
/// copy(&from, &mut to, &Path::parse("list.1"));
///
/// assert_eq!(
///     to,
///     Value::object([("list", Value::array([Value::Hole, Value::from("b")]))]),
/// );
/// ```
pub fn copy(from: &Value, to: &mut Value, path: &Path) {
    if !to.is_container() {
        return;
    }
    copy_segments(from, to, path.segments());
}

fn copy_segments(from: &Value, to: &mut Value, segments: &[String]) {
    let Some((key, rest)) = segments.split_first() else {
        return;
    };
    let Some(value) = from.get(key) else {
        return;
    };
    // `key` is an index below this when `from` is an array.
    let max_len = from.as_array().map_or(0, <[Value]>::len);

    if !value.is_container() {
        to.set_within(key, value.clone(), max_len);
        return;
    }

    if let Some(existing) = to.get_mut(key).filter(|existing| existing.is_container()) {
        copy_segments(value, existing, rest);
        return;
    }

    if rest.is_empty() {
        to.set_within(key, value.clone(), max_len);
        return;
    }

    let mut fresh = value.empty_like();
    copy_segments(value, &mut fresh, rest);
    to.set_within(key, fresh, max_len);
}
