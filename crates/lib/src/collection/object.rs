//! Opaque object values.
//!
//! Host objects are stored in a collection as [`Value::Object`]. The collection
//! never inspects them directly; instead it goes through the [`Object`]
//! capability trait, which lets an object expose named fields (used by path
//! lookups and [`Collection::col`](crate::Collection::col)), named methods
//! (used by [`apply_to_all`](crate::dispatch::apply_to_all)) and a string or
//! value form (used by `join`, comparisons and JSON export).

use std::fmt;

use super::value::Value;

/// Capability trait for opaque values stored in a collection.
///
/// Every method except [`Object::type_name`] has a default that reports the
/// capability as unsupported.
///
/// ```
/// # use kollect::{Object, Value};
/// #[derive(Debug)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// impl Object for Point {
///     fn type_name(&self) -> &str {
///         "Point"
///     }
///
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "x" => Some(Value::Int(self.x)),
///             "y" => Some(Value::Int(self.y)),
///             _ => None,
///         }
///     }
/// }
///
/// let point = Value::object(Point { x: 1, y: 2 });
/// assert_eq!(point.as_object().and_then(|o| o.field("y")), Some(Value::Int(2)));
/// ```
pub trait Object: fmt::Debug {
    /// Name used in error messages and type checks
    fn type_name(&self) -> &str;

    /// Reads a named field, `None` if the object has no such field
    fn field(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Invokes a named method.
    ///
    /// Returns `None` when the object does not support `method`, otherwise the
    /// result of the call.
    fn call(&self, _method: &str, _args: &[Value]) -> Option<crate::Result<Value>> {
        None
    }

    /// String form of the object, `None` if it cannot be stringified
    fn to_text(&self) -> Option<String> {
        None
    }

    /// Plain-data form of the object used for JSON export
    fn to_value(&self) -> Option<Value> {
        None
    }
}
