//! Set algebra between collections.
//!
//! The `diff*` and `intersect*` families return entries of `self`, with their
//! keys and in their order, filtered by membership in `other`. Three modes
//! exist:
//!
//! - by value (`diff`, `intersect`)
//! - by key and value (`diff_assoc`, `intersect_assoc`)
//! - by key (`diff_keys`, `intersect_keys`)
//!
//! Plain forms compare values by their string representation, so `1`, `1.0`
//! and `"1"` are equal. The `_by` forms take a comparator returning
//! [`Ordering`]; `Ordering::Equal` means "same". For any comparison,
//! `diff(x)` and `intersect(x)` partition `self`.

use std::{cmp::Ordering, collections::HashSet};

use super::{Collection, Key, Value, renumber_int_keys};

impl Collection {
    /// Entries whose value is not present in `other`.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a" => "foo", "b" => "bar"];
    /// assert_eq!(c.diff(kollect!["foo"]), kollect!["b" => "bar"]);
    /// ```
    pub fn diff(&self, other: impl Into<Collection>) -> Collection {
        let other = value_texts(&other.into());
        self.filter(|value, _| !other.contains(&value.comparison_text()))
    }

    /// Entries whose value matches no value of `other` under `cmp`.
    pub fn diff_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.into();
        self.filter(|value, _| !other.values().any(|o| cmp(value, o).is_eq()))
    }

    /// Entries whose key is missing from `other` or maps to a different value.
    pub fn diff_assoc(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|value, key| !same_text_at(&other, key, value))
    }

    /// Like [`Collection::diff_assoc`], comparing the values under `cmp`.
    pub fn diff_assoc_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.into();
        self.filter(|value, key| {
            !other
                .get_key(key)
                .is_some_and(|o| cmp(value, o).is_eq())
        })
    }

    /// Entries whose key is not present in `other`.
    pub fn diff_keys(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|_, key| !other.has_exact(key))
    }

    /// Entries whose key matches no key of `other` under `cmp`.
    pub fn diff_keys_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let other = other.into();
        self.filter(|_, key| !other.keys().any(|o| cmp(key, o).is_eq()))
    }

    /// Entries whose value is present in `other`.
    pub fn intersect(&self, other: impl Into<Collection>) -> Collection {
        let other = value_texts(&other.into());
        self.filter(|value, _| other.contains(&value.comparison_text()))
    }

    /// Entries whose value matches some value of `other` under `cmp`.
    pub fn intersect_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.into();
        self.filter(|value, _| other.values().any(|o| cmp(value, o).is_eq()))
    }

    /// Entries present in `other` under the same key with the same value.
    pub fn intersect_assoc(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|value, key| same_text_at(&other, key, value))
    }

    /// Like [`Collection::intersect_assoc`], comparing the values under `cmp`.
    pub fn intersect_assoc_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let other = other.into();
        self.filter(|value, key| other.get_key(key).is_some_and(|o| cmp(value, o).is_eq()))
    }

    /// Entries whose key is present in `other`.
    pub fn intersect_keys(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|_, key| other.has_exact(key))
    }

    /// Entries whose key matches some key of `other` under `cmp`.
    pub fn intersect_keys_by<F>(&self, other: impl Into<Collection>, mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let other = other.into();
        self.filter(|_, key| other.keys().any(|o| cmp(key, o).is_eq()))
    }

    /// Adds the entries of `other` whose keys are not present yet.
    ///
    /// Existing entries, integer-keyed ones included, are never overwritten.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a" => 1, "b" => 2];
    /// assert_eq!(c.union(kollect!["b" => 4, "c" => 6]), kollect!["a" => 1, "b" => 2, "c" => 6]);
    /// ```
    pub fn union(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        let mut out = self.clone();
        out.extend(
            other
                .iter()
                .filter(|(key, _)| !self.has_exact(key))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        out
    }

    /// Merges `other` into a copy of `self`.
    ///
    /// Every key of `other` overwrites in place, integer keys included, and
    /// new keys are appended. With `recursive` set, two collections under the
    /// same key are merged the same way instead of overwritten.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a", "b"];
    /// assert_eq!(c.union(kollect![0 => "c"]), kollect!["a", "b"]);
    /// assert_eq!(c.merge(kollect![0 => "c"], false), kollect!["c", "b"]);
    /// ```
    pub fn merge(&self, other: impl Into<Collection>, recursive: bool) -> Collection {
        let other = other.into();
        let mut out = self.clone();
        for (key, value) in &other {
            let merged = match (out.get_key(key), value) {
                (Some(Value::Collection(mine)), Value::Collection(theirs)) if recursive => {
                    Value::Collection(mine.merge(theirs.clone(), true))
                }
                _ => value.clone(),
            };
            out.set(key.clone(), merged);
        }
        out
    }

    /// Appends `other` to a copy of `self`.
    ///
    /// Integer-keyed values of `other` are appended and string keys overwrite
    /// in place. Integer keys of the result are renumbered from 0. With
    /// `recursive` set, two collections under the same string key are
    /// appended the same way instead of overwritten.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a", "b"];
    /// assert_eq!(c.append(kollect![0 => "c"], false), kollect!["a", "b", "c"]);
    /// ```
    pub fn append(&self, other: impl Into<Collection>, recursive: bool) -> Collection {
        let other = other.into();
        let mut out = self.derive(renumber_int_keys(self.entries().iter().cloned()));
        for (key, value) in &other {
            match key {
                Key::Int(_) => {
                    out.push(value.clone());
                }
                Key::Str(_) => {
                    let appended = match (out.get_key(key), value) {
                        (Some(Value::Collection(mine)), Value::Collection(theirs)) if recursive => {
                            Value::Collection(mine.append(theirs.clone(), true))
                        }
                        _ => value.clone(),
                    };
                    out.set(key.clone(), appended);
                }
            }
        }
        out
    }

    /// Compares contents regardless of order.
    ///
    /// Without `assoc`, only the values matter (by string representation, in
    /// both directions). With `assoc`, every key must map to an equal value in
    /// both collections.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a" => 1, "b" => 2];
    /// assert!(c.equals(kollect!["b" => 2, "a" => 1], true));
    /// assert!(c.equals(kollect!["2", "1"], false));
    /// assert!(!c.equals(kollect!["x" => 1, "y" => 2], true));
    /// ```
    pub fn equals(&self, other: impl Into<Collection>, assoc: bool) -> bool {
        let other = other.into();
        if assoc {
            self.diff_assoc(other.clone()).is_empty() && other.diff_assoc(self.clone()).is_empty()
        } else {
            self.diff(other.clone()).is_empty() && other.diff(self.clone()).is_empty()
        }
    }

    /// Exact key membership, without path resolution.
    fn has_exact(&self, key: &Key) -> bool {
        self.get_key(key).is_some()
    }
}

fn value_texts(collection: &Collection) -> HashSet<String> {
    collection.values().map(Value::comparison_text).collect()
}

fn same_text_at(collection: &Collection, key: &Key, value: &Value) -> bool {
    collection
        .get_key(key)
        .is_some_and(|other| other.comparison_text() == value.comparison_text())
}
