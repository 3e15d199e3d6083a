//! The collection engine.
//!
//! [`Collection`] is an ordered key/value container in the style of an
//! associative array: entries keep their insertion order, keys are integers or
//! strings, and values are dynamically typed [`Value`]s. Operations are split
//! across submodules by family:
//!
//! - [`access`] - get/set/has/remove, path lookup, stack and queue helpers
//! - [`transform`] - map, filter, walk, collapse, flat, col, chunk
//! - [`set_ops`] - diff/intersect variants, union, merge, append
//! - [`ordering`] - sort variants, reverse, shuffle, random sampling
//! - [`slice`] - slice and splice
//! - [`aggregate`] - reduce, join, sum, min, max
//! - [`export`] - array and JSON export, serde support
//!
//! # Copy-on-write
//!
//! Cloning a collection is cheap: both handles share the same backing storage
//! until one of them is mutated, at which point the mutated handle gets its own
//! copy.
//!
//! ```
//! use kollect::{Collection, kollect};
//!
//! let original = kollect!["a" => 1, "b" => 2];
//! let mut copy = original.copy();
//! assert!(copy.shares_storage_with(&original));
//!
//! copy.set("c", 3);
//! assert!(!copy.shares_storage_with(&original));
//! assert_eq!(original.len(), 2);
//! assert_eq!(copy.len(), 3);
//! ```

use std::{collections::HashMap, fmt, rc::Rc};

pub mod access;
pub mod aggregate;
pub mod compare;
pub mod errors;
pub mod export;
pub mod key;
pub mod object;
pub mod ordering;
pub(crate) mod path;
pub mod set_ops;
pub mod slice;
pub mod transform;
pub mod value;

pub use access::Fallback;
pub use compare::{SortFlags, SortMode};
pub use errors::CollectionError;
pub use export::JsonOptions;
pub use key::Key;
pub use object::Object;
pub use value::Value;

/// Backing storage shared between collection handles.
#[derive(Debug, Clone, Default)]
struct Store {
    /// Entries in iteration order
    entries: Vec<(Key, Value)>,
    /// Position of each key in `entries`
    index: HashMap<Key, usize>,
    /// Highest integer key currently present
    max_int: Option<i64>,
}

impl Store {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            max_int: None,
        }
    }

    fn from_entries(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        let entries = entries.into_iter();
        let mut store = Store::with_capacity(entries.size_hint().0);
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    fn get(&self, key: &Key) -> Option<&Value> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        let pos = *self.index.get(key)?;
        Some(&mut self.entries[pos].1)
    }

    /// Upserts `key`, keeping the position of an existing entry.
    fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        if let Key::Int(n) = key {
            self.max_int = Some(self.max_int.map_or(n, |max| max.max(n)));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Next key for an append: one past the highest integer key, or 0.
    ///
    /// At `i64::MAX` the append saturates and overwrites that key.
    fn next_key(&self) -> Key {
        Key::Int(self.max_int.map_or(0, |max| max.saturating_add(1)))
    }

    fn push(&mut self, value: Value) -> Key {
        let key = self.next_key();
        self.insert(key.clone(), value);
        key
    }

    fn remove(&mut self, key: &Key) -> Option<Value> {
        let pos = self.index.remove(key)?;
        let (removed, value) = self.entries.remove(pos);
        for (key, _) in &self.entries[pos..] {
            if let Some(p) = self.index.get_mut(key) {
                *p -= 1;
            }
        }
        if removed.as_int().is_some() && removed.as_int() == self.max_int {
            self.max_int = self.entries.iter().filter_map(|(k, _)| k.as_int()).max();
        }
        Some(value)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.max_int = None;
    }
}

/// Ordered key/value collection with copy-on-write storage.
///
/// # Examples
///
/// ```
/// use kollect::{Collection, Key, kollect};
///
/// let mut c = Collection::new();
/// c.push("first");
/// c.set("name", "Alice");
/// c.push("second");
///
/// assert_eq!(c.keys().collect::<Vec<_>>(), vec![&Key::Int(0), &Key::from("name"), &Key::Int(1)]);
/// assert_eq!(c.get("name"), Some("Alice".into()));
///
/// let nested = kollect!["user" => kollect!["profile" => kollect!["name" => "Bob"]]];
/// assert_eq!(nested.get("user/profile/name"), Some("Bob".into()));
/// ```
#[derive(Clone, Default)]
pub struct Collection {
    store: Rc<Store>,
    /// Per-instance path delimiter, falls back to the process-wide default
    delimiter: Option<Rc<str>>,
}

impl Collection {
    /// Creates a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Rc::new(Store::with_capacity(capacity)),
            delimiter: None,
        }
    }

    /// Builds a collection from key/value pairs.
    ///
    /// Keys are normalized on insertion and a repeated key overwrites the
    /// earlier value in place.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
    {
        entries.into_iter().collect()
    }

    /// Builds a list from values, keyed `0..n`.
    pub fn from_values<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        values.into_iter().map(Into::into).collect()
    }

    /// Returns a second handle to the same storage.
    ///
    /// The storage is duplicated lazily by whichever handle is mutated first.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Returns true while both handles still share backing storage
    pub fn shares_storage_with(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.store.entries.len()
    }

    /// Returns true if the collection has no entries
    pub fn is_empty(&self) -> bool {
        self.store.entries.is_empty()
    }

    /// Removes all entries
    pub fn clear(&mut self) -> &mut Self {
        if Rc::strong_count(&self.store) > 1 {
            // No need to copy data that is about to be dropped
            self.store = Rc::default();
        } else {
            self.store_mut().clear();
        }
        self
    }

    /// Returns true if the keys are exactly `0..len` in order
    pub fn is_list(&self) -> bool {
        self.store
            .entries
            .iter()
            .enumerate()
            .all(|(i, (key, _))| *key == i as i64)
    }

    /// Returns an iterator over key/value pairs in order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.store.entries.iter(),
        }
    }

    /// Returns an iterator over keys and mutable values in order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.store_mut()
            .entries
            .iter_mut()
            .map(|(key, value)| (&*key, value))
    }

    /// Returns an iterator over the keys in order
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.store.entries.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in order
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.store.entries.iter().map(|(_, value)| value)
    }

    /// Borrows the entries as a slice
    pub fn entries(&self) -> &[(Key, Value)] {
        &self.store.entries
    }

    /// Returns the path delimiter in effect for this collection
    pub fn delimiter(&self) -> String {
        match &self.delimiter {
            Some(delimiter) => delimiter.to_string(),
            None => crate::config::path_delimiter(),
        }
    }

    /// Builder method overriding the path delimiter for this collection.
    ///
    /// Collections derived from this one (by `map`, `filter`, `slice`, ...)
    /// inherit the override.
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.set_delimiter(delimiter);
        self
    }

    /// Overrides the path delimiter for this collection.
    ///
    /// An empty delimiter is ignored and the process-wide default stays in
    /// effect.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        let delimiter = delimiter.into();
        self.delimiter = (!delimiter.is_empty()).then(|| Rc::from(delimiter));
        self
    }

    /// Deep copy with no storage shared with any other handle, at any depth.
    pub fn detached(&self) -> Collection {
        let entries = self
            .store
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.detached()));
        Collection {
            store: Rc::new(Store::from_entries(entries)),
            delimiter: self.delimiter.clone(),
        }
    }

    /// Mutable access to the storage, splitting it off first if shared.
    fn store_mut(&mut self) -> &mut Store {
        if Rc::strong_count(&self.store) > 1 {
            tracing::trace!(
                entries = self.store.entries.len(),
                "Copy-on-write split of shared collection storage"
            );
        }
        Rc::make_mut(&mut self.store)
    }

    /// New collection carrying this collection's delimiter override.
    pub(crate) fn derive(&self, entries: impl IntoIterator<Item = (Key, Value)>) -> Collection {
        Collection {
            store: Rc::new(Store::from_entries(entries)),
            delimiter: self.delimiter.clone(),
        }
    }

    /// New list carrying this collection's delimiter override.
    pub(crate) fn derive_values(&self, values: impl IntoIterator<Item = Value>) -> Collection {
        self.derive(
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (Key::from(i), value)),
        )
    }

    /// Replaces every entry of this handle at once.
    pub(crate) fn replace_entries(&mut self, entries: impl IntoIterator<Item = (Key, Value)>) {
        self.store = Rc::new(Store::from_entries(entries));
    }

    /// Moves the entries out of this handle, leaving it empty.
    pub(crate) fn take_entries(&mut self) -> Vec<(Key, Value)> {
        let store = std::mem::take(&mut self.store);
        Rc::try_unwrap(store)
            .map(|store| store.entries)
            .unwrap_or_else(|shared| shared.entries.clone())
    }
}

/// Reassigns integer keys sequentially from 0 in iteration order, keeping
/// string keys.
pub(crate) fn renumber_int_keys(
    entries: impl IntoIterator<Item = (Key, Value)>,
) -> Vec<(Key, Value)> {
    let mut next = 0i64;
    entries
        .into_iter()
        .map(|(key, value)| match key {
            Key::Int(_) => {
                let key = Key::Int(next);
                next += 1;
                (key, value)
            }
            key => (key, value),
        })
        .collect()
}

/// Iterator over the entries of a [`Collection`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = std::vec::IntoIter<(Key, Value)>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.take_entries().into_iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Collection {
            store: Rc::new(Store::from_entries(
                iter.into_iter().map(|(k, v)| (k.into(), v.into())),
            )),
            delimiter: None,
        }
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut store = Store::with_capacity(iter.size_hint().0);
        for value in iter {
            store.push(value);
        }
        Collection {
            store: Rc::new(store),
            delimiter: None,
        }
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Collection {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let store = self.store_mut();
        for (key, value) in iter {
            store.insert(key.into(), value.into());
        }
    }
}

impl Extend<Value> for Collection {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        let store = self.store_mut();
        for value in iter {
            store.push(value);
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        Collection::from_values(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Collection {
    fn from(values: [T; N]) -> Self {
        Collection::from_values(values)
    }
}

impl From<serde_json::Value> for Collection {
    /// Arrays and objects become collections; any other JSON value becomes a
    /// single-element list.
    fn from(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Collection(c) => c,
            scalar => Collection::from_values([scalar]),
        }
    }
}

impl PartialEq for Collection {
    /// Same entries in the same order. The delimiter override is not data and
    /// is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || self.store.entries == other.store.entries
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.is_list();
        write!(f, "{}", if list { "[" } else { "{" })?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if list {
                write!(f, "{value}")?;
            } else {
                write!(f, "{key}: {value}")?;
            }
        }
        write!(f, "{}", if list { "]" } else { "}" })
    }
}

/// Builds a [`Collection`] from values or `key => value` pairs.
///
/// ```
/// use kollect::{Key, kollect};
///
/// let list = kollect![1, 2, 3];
/// assert!(list.is_list());
///
/// let map = kollect!["a" => 1, "5" => 2];
/// assert_eq!(map.keys().collect::<Vec<_>>(), vec![&Key::from("a"), &Key::Int(5)]);
///
/// assert!(kollect![].is_empty());
/// ```
#[macro_export]
macro_rules! kollect {
    () => {
        $crate::Collection::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut collection = $crate::Collection::new();
        $(
            collection.set($key, $value);
        )+
        collection
    }};

    ($($value:expr),+ $(,)?) => {{
        let mut collection = $crate::Collection::new();
        $(
            collection.push($value);
        )+
        collection
    }};
}
