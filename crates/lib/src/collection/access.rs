//! Accessors: lookups, upserts, removals and stack/queue helpers.
//!
//! Lookups by string key try the exact key first. If there is no such entry
//! and the key contains the collection's path delimiter, the key is resolved as
//! a path through nested collections and object fields.
//!
//! Missing elements are reported as `None`, or through a [`Fallback`] chosen by
//! the caller: a default value, a lazily computed value, or an error to raise.

use std::fmt;

use super::{Collection, Key, Value, path, renumber_int_keys};
use crate::Result;

/// What an accessor produces when the requested element is missing.
///
/// ```
/// use kollect::{CollectionError, Fallback, Value, kollect};
///
/// let c = kollect!["a" => 1];
/// assert_eq!(c.get_with("b", Fallback::value(2)).unwrap(), Value::Int(2));
/// assert_eq!(c.get_with("b", Fallback::lazy(|| Value::from("computed"))).unwrap(), "computed");
///
/// let err = c.get_with("b", Fallback::raise(CollectionError::custom("no b"))).unwrap_err();
/// assert_eq!(err.to_string(), "no b");
/// ```
pub enum Fallback {
    /// Return this value
    Value(Value),
    /// Call this closure to produce the value, only when needed
    Lazy(Box<dyn FnOnce() -> Value>),
    /// Fail with this error
    Raise(crate::Error),
}

impl Fallback {
    /// Fallback to a plain value
    pub fn value(value: impl Into<Value>) -> Self {
        Fallback::Value(value.into())
    }

    /// Fallback to a lazily computed value
    pub fn lazy(f: impl FnOnce() -> Value + 'static) -> Self {
        Fallback::Lazy(Box::new(f))
    }

    /// Fallback that raises `error`
    pub fn raise(error: impl Into<crate::Error>) -> Self {
        Fallback::Raise(error.into())
    }

    /// Produces the fallback for the missing element `what`.
    fn resolve(self, what: &dyn fmt::Display) -> Result<Value> {
        match self {
            Fallback::Value(value) => Ok(value),
            Fallback::Lazy(f) => Ok(f()),
            Fallback::Raise(error) => {
                tracing::warn!(
                    element = %what,
                    error = %error,
                    "Raising fallback error for missing element"
                );
                Err(error)
            }
        }
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::Value(Value::Null)
    }
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Fallback::Lazy(_) => f.write_str("Lazy(..)"),
            Fallback::Raise(error) => f.debug_tuple("Raise").field(error).finish(),
        }
    }
}

impl From<Value> for Fallback {
    fn from(value: Value) -> Self {
        Fallback::Value(value)
    }
}

impl From<crate::Error> for Fallback {
    fn from(error: crate::Error) -> Self {
        Fallback::Raise(error)
    }
}

impl From<super::CollectionError> for Fallback {
    fn from(error: super::CollectionError) -> Self {
        Fallback::Raise(error.into())
    }
}

// Lookups
impl Collection {
    /// Gets the value at an exact key, without path resolution.
    pub fn get_key(&self, key: impl Into<Key>) -> Option<&Value> {
        self.store.get(&key.into())
    }

    /// Gets a mutable reference to the value at an exact key.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        let key = key.into();
        if !self.store.index.contains_key(&key) {
            // Avoid splitting shared storage for a miss
            return None;
        }
        self.store_mut().get_mut(&key)
    }

    /// Gets a value by key or path.
    ///
    /// An entry holding [`Value::Null`] is found and returned as
    /// `Some(Value::Null)`.
    ///
    /// ```
    /// # use kollect::{Value, kollect};
    /// let c = kollect!["a" => kollect!["b" => kollect!["c" => 1]], "n" => Value::Null];
    /// assert_eq!(c.get("a/b/c"), Some(Value::Int(1)));
    /// assert_eq!(c.get("a/x/c"), None);
    /// assert_eq!(c.get("n"), Some(Value::Null));
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        if let Some(value) = self.store.get(&key) {
            return Some(value.clone());
        }
        match &key {
            Key::Str(path) => path::resolve(self, path, &self.delimiter()),
            Key::Int(_) => None,
        }
    }

    /// Gets a value by key or path, or `default` when missing.
    pub fn get_or(&self, key: impl Into<Key>, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Gets a value by key or path, calling `f` only when missing.
    pub fn get_or_else(&self, key: impl Into<Key>, f: impl FnOnce() -> Value) -> Value {
        self.get(key).unwrap_or_else(f)
    }

    /// Gets a value by key or path, applying `fallback` when missing.
    ///
    /// # Errors
    ///
    /// Returns the fallback's error when the element is missing and the
    /// fallback is [`Fallback::Raise`].
    pub fn get_with(&self, key: impl Into<Key>, fallback: Fallback) -> Result<Value> {
        let key = key.into();
        match self.get(key.clone()) {
            Some(value) => Ok(value),
            None => fallback.resolve(&key),
        }
    }

    /// Gets a value by key or path with conversion through `TryFrom`.
    ///
    /// Returns `None` when the key is missing or the conversion fails.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["name" => "Alice", "age" => 30];
    /// assert_eq!(c.get_as::<String>("name"), Some("Alice".to_string()));
    /// assert_eq!(c.get_as::<i64>("age"), Some(30));
    /// assert_eq!(c.get_as::<i64>("name"), None);
    /// ```
    pub fn get_as<T>(&self, key: impl Into<Key>) -> Option<T>
    where
        T: for<'a> TryFrom<&'a Value>,
    {
        let value = self.get(key)?;
        T::try_from(&value).ok()
    }

    /// Returns true if the key or path exists, even when it holds null.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        if self.store.index.contains_key(&key) {
            return true;
        }
        match &key {
            Key::Str(path) => path::resolve(self, path, &self.delimiter()).is_some(),
            Key::Int(_) => false,
        }
    }

    /// Returns true if every key or path exists.
    ///
    /// An empty key list is vacuously true.
    pub fn has_all<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> bool {
        keys.into_iter().all(|key| self.has(key))
    }

    /// Returns the first value
    pub fn first(&self) -> Option<&Value> {
        self.store.entries.first().map(|(_, value)| value)
    }

    /// Returns the first value, applying `fallback` when empty.
    pub fn first_with(&self, fallback: Fallback) -> Result<Value> {
        match self.first() {
            Some(value) => Ok(value.clone()),
            None => fallback.resolve(&"first element"),
        }
    }

    /// Returns the last value
    pub fn last(&self) -> Option<&Value> {
        self.store.entries.last().map(|(_, value)| value)
    }

    /// Returns the last value, applying `fallback` when empty.
    pub fn last_with(&self, fallback: Fallback) -> Result<Value> {
        match self.last() {
            Some(value) => Ok(value.clone()),
            None => fallback.resolve(&"last element"),
        }
    }

    /// Returns the first key
    pub fn first_key(&self) -> Option<&Key> {
        self.store.entries.first().map(|(key, _)| key)
    }

    /// Returns the last key
    pub fn last_key(&self) -> Option<&Key> {
        self.store.entries.last().map(|(key, _)| key)
    }

    /// Returns the key the next [`Collection::push`] will use.
    pub fn next_key(&self) -> Key {
        self.store.next_key()
    }

    /// Returns the first entry matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<(&Key, &Value)>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().find(|(key, value)| predicate(value, key))
    }

    /// Returns the last entry matching `predicate`.
    pub fn find_last<F>(&self, mut predicate: F) -> Option<(&Key, &Value)>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().rev().find(|(key, value)| predicate(value, key))
    }

    /// Returns the key of the first value loosely equal to `needle`.
    pub fn search(&self, needle: impl Into<Value>) -> Option<&Key> {
        let needle = needle.into();
        self.iter()
            .find(|(_, value)| value.loose_eq(&needle))
            .map(|(key, _)| key)
    }

    /// Returns true if some value is loosely equal to `needle`.
    pub fn contains(&self, needle: impl Into<Value>) -> bool {
        self.search(needle).is_some()
    }

    /// Returns a new collection with only the given keys, in this collection's
    /// order.
    pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Collection {
        let keys: std::collections::HashSet<Key> = keys.into_iter().map(Into::into).collect();
        self.derive(
            self.iter()
                .filter(|(key, _)| keys.contains(*key))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }

    /// Returns a new collection without the given keys.
    pub fn except<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Collection {
        let keys: std::collections::HashSet<Key> = keys.into_iter().map(Into::into).collect();
        self.derive(
            self.iter()
                .filter(|(key, _)| !keys.contains(*key))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

// Mutation
impl Collection {
    /// Upserts `value` at `key`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.store_mut().insert(key.into(), value.into());
        self
    }

    /// Upserts `value` at `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.store_mut().insert(key.into(), value.into())
    }

    /// Appends `value` under the next integer key.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.store_mut().push(value.into());
        self
    }

    /// Removes an exact key (paths are not resolved). Missing keys are ignored.
    pub fn remove(&mut self, key: impl Into<Key>) -> &mut Self {
        self.pull(key);
        self
    }

    /// Removes several exact keys. Missing keys are ignored.
    pub fn remove_all<K: Into<Key>>(&mut self, keys: impl IntoIterator<Item = K>) -> &mut Self {
        for key in keys {
            self.pull(key);
        }
        self
    }

    /// Removes an exact key and returns its value.
    pub fn pull(&mut self, key: impl Into<Key>) -> Option<Value> {
        let key = key.into();
        if !self.store.index.contains_key(&key) {
            return None;
        }
        self.store_mut().remove(&key)
    }

    /// Removes an exact key and returns its value, applying `fallback` when
    /// the key is missing.
    pub fn pull_with(&mut self, key: impl Into<Key>, fallback: Fallback) -> Result<Value> {
        let key = key.into();
        match self.pull(key.clone()) {
            Some(value) => Ok(value),
            None => fallback.resolve(&key),
        }
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<Value> {
        let key = self.last_key()?.clone();
        self.pull(key)
    }

    /// Removes and returns the first value.
    ///
    /// Integer keys of the remaining entries are renumbered from 0; string
    /// keys are kept.
    pub fn shift(&mut self) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        let mut entries = self.take_entries();
        let (_, first) = entries.remove(0);
        self.replace_entries(renumber_int_keys(entries));
        Some(first)
    }

    /// Prepends `value`, renumbering integer keys from 0.
    pub fn unshift(&mut self, value: impl Into<Value>) -> &mut Self {
        let entries = self.take_entries();
        let prepended = std::iter::once((Key::Int(0), value.into())).chain(entries);
        self.replace_entries(renumber_int_keys(prepended));
        self
    }

    /// Prepends `value` under `key`, keeping every other key unchanged.
    ///
    /// An existing entry with the same key is dropped.
    pub fn unshift_key(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        let key = key.into();
        let entries = self.take_entries();
        let rest = entries.into_iter().filter(|(k, _)| *k != key);
        self.replace_entries(std::iter::once((key.clone(), value.into())).chain(rest));
        self
    }
}
