//! Path resolution for nested lookups.
//!
//! A path key such as `"user/profile/name"` addresses a value several levels
//! down: each segment is looked up as an exact key in a nested collection, or
//! as a field of an [`Object`](super::Object). Resolution stops with `None` as
//! soon as a segment is missing or the current value cannot be descended into.

use super::{Collection, Key, Value};

/// Splits `path` on `delimiter`.
///
/// Empty segments are kept, so `"a//b"` addresses the key `""` inside `a`.
pub(crate) fn segments<'a>(path: &'a str, delimiter: &str) -> Vec<&'a str> {
    if delimiter.is_empty() {
        return vec![path];
    }
    path.split(delimiter).collect()
}

/// Resolves `path` starting at `root`.
pub(crate) fn resolve(root: &Collection, path: &str, delimiter: &str) -> Option<Value> {
    let segments = segments(path, delimiter);
    let (first, rest) = segments.split_first()?;
    let start = root.get_key(*first)?;
    descend(start, rest)
}

/// Resolves a pre-split path inside a single value.
///
/// An empty path resolves to the value itself.
pub(crate) fn descend(value: &Value, segments: &[&str]) -> Option<Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(value.clone());
    };
    match value {
        Value::Collection(c) => descend(c.get_key(Key::parse(first))?, rest),
        Value::Object(object) => descend(&object.field(first)?, rest),
        _ => None,
    }
}
