//! Named method dispatch on collections.
//!
//! A [`MethodRegistry`] maps method names to callbacks that receive the
//! collection and the call arguments. Invoking a name with no registered
//! callback falls back to [`apply_to_all`], which calls the method on every
//! [`Object`](crate::Object) element that supports it.
//!
//! ```
//! use kollect::{Collection, Value, dispatch::MethodRegistry, kollect};
//!
//! let mut registry = MethodRegistry::new();
//! registry.register("total", |c: &Collection, _: &[Value]| Ok(c.sum()));
//!
//! let c = kollect![1, 2, 3];
//! assert_eq!(registry.invoke(&c, "total", &[]).unwrap(), Value::Int(6));
//! ```

use std::{collections::HashMap, fmt};

use tracing::{debug, trace};

use crate::{Collection, Result, Value};

/// Callback stored in a [`MethodRegistry`].
pub type Method = Box<dyn Fn(&Collection, &[Value]) -> Result<Value>>;

/// Calls `method` on every element that supports it.
///
/// Only [`Value::Object`] elements can support methods; every other element,
/// and every object whose [`Object::call`](crate::Object::call) returns
/// `None`, is skipped. Results are keyed like their source elements.
///
/// # Errors
///
/// The first error returned by an element is propagated.
pub fn apply_to_all(collection: &Collection, method: &str, args: &[Value]) -> Result<Collection> {
    let mut results = collection.derive(std::iter::empty());
    for (key, value) in collection {
        let Some(object) = value.as_object() else {
            continue;
        };
        match object.call(method, args) {
            Some(result) => {
                results.set(key.clone(), result?);
            }
            None => trace!(
                method,
                key = %key,
                type_name = object.type_name(),
                "Element does not support method"
            ),
        }
    }
    Ok(results)
}

/// Registry of named collection methods.
///
/// The registry is an ordinary value owned by the caller; nothing is shared
/// between registries.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, Method>,
}

impl MethodRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `method` under `name`, returning true if it replaced an
    /// earlier registration.
    pub fn register<F>(&mut self, name: impl Into<String>, method: F) -> bool
    where
        F: Fn(&Collection, &[Value]) -> Result<Value> + 'static,
    {
        let name = name.into();
        debug!(name = %name, "Registering collection method");
        self.methods.insert(name, Box::new(method)).is_some()
    }

    /// Removes the method registered under `name`, returning true if there was
    /// one.
    pub fn unregister(&mut self, name: &str) -> bool {
        debug!(name, "Unregistering collection method");
        self.methods.remove(name).is_some()
    }

    /// Returns true if a method is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns the registered names in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Invokes `name` on `collection`.
    ///
    /// A registered method is called directly. Otherwise the call is applied
    /// to every element through [`apply_to_all`] and the collected results are
    /// returned as a [`Value::Collection`], which is empty when no element
    /// supports `name`.
    ///
    /// # Errors
    ///
    /// Errors from the method itself are propagated.
    pub fn invoke(&self, collection: &Collection, name: &str, args: &[Value]) -> Result<Value> {
        if let Some(method) = self.methods.get(name) {
            return method(collection, args);
        }
        debug!(
            name,
            len = collection.len(),
            "No registered method, applying to elements"
        );
        apply_to_all(collection, name, args).map(Value::Collection)
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("MethodRegistry")
            .field("methods", &names)
            .finish()
    }
}
