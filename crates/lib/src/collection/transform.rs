//! Transformations producing new collections or rewriting values in place.
//!
//! Every transformation is eager: the result is fully materialized before the
//! method returns. Callbacks receive `(value, key)` and cannot reach the
//! collection being traversed, so they cannot invalidate the iteration.

use std::collections::HashSet;

use super::{Collection, CollectionError, Key, Value, path, renumber_int_keys};
use crate::Result;

/// Validates an optional depth argument, `None` meaning unbounded.
fn depth_limit(depth: Option<i64>) -> Result<usize> {
    match depth {
        None => Ok(usize::MAX),
        Some(d) if d < 0 => Err(CollectionError::invalid_argument(
            "depth",
            format!("must be zero or greater, got {d}"),
        )
        .into()),
        Some(d) => Ok(usize::try_from(d).unwrap_or(usize::MAX)),
    }
}

impl Collection {
    /// Applies `f` to every value, keeping the keys.
    ///
    /// ```
    /// # use kollect::{Value, kollect};
    /// let c = kollect!["a" => 1, "b" => 2];
    /// let doubled = c.map(|v, _| Value::Int(v.as_int().unwrap_or(0) * 2));
    /// assert_eq!(doubled, kollect!["a" => 2, "b" => 4]);
    /// ```
    pub fn map<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        self.derive(self.iter().map(|(key, value)| (key.clone(), f(value, key))))
    }

    /// Keeps the entries for which `predicate` returns true. Keys are kept.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.derive(
            self.iter()
                .filter(|(key, value)| predicate(value, key))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }

    /// Keeps the truthy entries, see [`Value::is_truthy`].
    pub fn filter_truthy(&self) -> Collection {
        self.filter(|value, _| value.is_truthy())
    }

    /// Drops the entries for which `predicate` returns true. Keys are kept.
    pub fn reject<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.filter(|value, key| !predicate(value, key))
    }

    /// Calls `f` for each entry until it returns false.
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        for (key, value) in self {
            if !f(value, key) {
                break;
            }
        }
        self
    }

    /// Returns true if `predicate` holds for every entry.
    pub fn every<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().all(|(key, value)| predicate(value, key))
    }

    /// Returns true if `predicate` holds for at least one entry.
    pub fn some<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().any(|(key, value)| predicate(value, key))
    }

    /// Rewrites values in place.
    ///
    /// `f` receives each value mutably, its key and `data`. With `recursive`
    /// set, nested collections are descended into and `f` is called on their
    /// values instead of on the collection itself. Keys and structure never
    /// change.
    ///
    /// ```
    /// # use kollect::{Value, kollect};
    /// let mut c = kollect!["a" => 1, "b" => kollect![2, 3]];
    /// c.walk(|v, _, step: &i64| *v = Value::Int(v.as_int().unwrap_or(0) + step), &10, true);
    /// assert_eq!(c, kollect!["a" => 11, "b" => kollect![12, 13]]);
    /// ```
    pub fn walk<D, F>(&mut self, mut f: F, data: &D, recursive: bool) -> &mut Self
    where
        D: ?Sized,
        F: FnMut(&mut Value, &Key, &D),
    {
        walk_entries(self, &mut f, data, recursive);
        self
    }

    /// Merges nested collections into one level, later keys overwriting
    /// earlier ones.
    ///
    /// `depth` limits how many levels are merged, `None` merges all of them.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] for a negative depth.
    pub fn collapse(&self, depth: Option<i64>) -> Result<Collection> {
        fn collapse_into(source: &Collection, out: &mut Collection, depth: usize) {
            for (key, value) in source {
                match value {
                    Value::Collection(inner) if depth > 0 => collapse_into(inner, out, depth - 1),
                    value => {
                        out.set(key.clone(), value.clone());
                    }
                }
            }
        }

        let depth = depth_limit(depth)?;
        let mut out = self.derive(std::iter::empty());
        collapse_into(self, &mut out, depth);
        Ok(out)
    }

    /// Flattens nested collections into a list keyed `0..n`, never
    /// overwriting.
    ///
    /// `depth` limits how many levels are flattened, `None` flattens all.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] for a negative depth.
    pub fn flat(&self, depth: Option<i64>) -> Result<Collection> {
        fn flatten_into(source: &Collection, out: &mut Vec<Value>, depth: usize) {
            for value in source.values() {
                match value {
                    Value::Collection(inner) if depth > 0 => flatten_into(inner, out, depth - 1),
                    value => out.push(value.clone()),
                }
            }
        }

        let depth = depth_limit(depth)?;
        let mut out = Vec::with_capacity(self.len());
        flatten_into(self, &mut out, depth);
        Ok(self.derive_values(out))
    }

    /// Extracts a column from a collection of records.
    ///
    /// `value_field` selects what each record contributes (`None` keeps the
    /// whole record); `index_field` selects the key it is stored under. Both
    /// accept paths. Records without the value field are skipped; records
    /// without a usable index are appended. Duplicate index values overwrite.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let records = kollect![
    ///     kollect!["id" => "i1", "val" => "v1"],
    ///     kollect!["id" => "i2", "val" => "v2"],
    /// ];
    /// assert_eq!(records.col(Some("val"), Some("id")), kollect!["i1" => "v1", "i2" => "v2"]);
    /// assert_eq!(records.col(Some("val"), None), kollect!["v1", "v2"]);
    /// ```
    pub fn col(&self, value_field: Option<&str>, index_field: Option<&str>) -> Collection {
        let delimiter = self.delimiter();
        let value_path = value_field.map(|field| path::segments(field, &delimiter));
        let index_path = index_field.map(|field| path::segments(field, &delimiter));

        let mut out = self.derive(std::iter::empty());
        for record in self.values() {
            let value = match &value_path {
                Some(segments) => match path::descend(record, segments) {
                    Some(value) => value,
                    None => continue,
                },
                None => record.clone(),
            };
            let key = index_path
                .as_ref()
                .and_then(|segments| path::descend(record, segments))
                .and_then(|index| Key::from_value(&index));
            match key {
                Some(key) => out.set(key, value),
                None => out.push(value),
            };
        }
        out
    }

    /// Returns the keys as a list.
    pub fn key_list(&self) -> Collection {
        self.derive_values(self.keys().cloned().map(Value::from))
    }

    /// Returns the values as a list keyed `0..n`.
    pub fn value_list(&self) -> Collection {
        self.derive_values(self.values().cloned())
    }

    /// Swaps keys and values.
    ///
    /// Values without a key form (see [`Key::from_value`]) are skipped. When
    /// several entries have the same value, the last one wins.
    pub fn flip(&self) -> Collection {
        self.derive(self.iter().filter_map(|(key, value)| {
            Some((Key::from_value(value)?, Value::from(key.clone())))
        }))
    }

    /// Drops values whose string form was already seen, keeping the first
    /// occurrence and its key.
    pub fn unique(&self) -> Collection {
        let mut seen = HashSet::new();
        self.derive(
            self.iter()
                .filter(|(_, value)| seen.insert(value.comparison_text()))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }

    /// Splits into a list of collections of at most `size` entries.
    ///
    /// Chunks are re-indexed from 0 unless `preserve_keys` is set.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] when `size` is 0.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Result<Collection> {
        if size < 1 {
            return Err(CollectionError::invalid_argument("size", "must be 1 or greater").into());
        }
        let chunks = self.entries().chunks(size).map(|chunk| {
            let chunk = if preserve_keys {
                self.derive(chunk.iter().cloned())
            } else {
                self.derive_values(chunk.iter().map(|(_, value)| value.clone()))
            };
            Value::Collection(chunk)
        });
        Ok(self.derive_values(chunks))
    }

    /// Uses this collection's values as keys for `values`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] when the lengths differ and
    /// [`CollectionError::TypeMismatch`] when a value has no key form.
    pub fn combine(&self, values: impl Into<Collection>) -> Result<Collection> {
        let values = values.into();
        if values.len() != self.len() {
            return Err(CollectionError::invalid_argument(
                "values",
                format!("expected {} values, got {}", self.len(), values.len()),
            )
            .into());
        }
        let mut out = self.derive(std::iter::empty());
        for (key, value) in self.values().zip(values.values()) {
            let key = Key::from_value(key).ok_or_else(|| CollectionError::TypeMismatch {
                expected: "int or text key".to_string(),
                actual: key.type_name().to_string(),
            })?;
            out.set(key, value.clone());
        }
        Ok(out)
    }

    /// Pads to `|size|` entries with `value`, at the end for a positive size
    /// and at the front for a negative one.
    ///
    /// Integer keys are renumbered from 0, string keys are kept. A size not
    /// larger than the current length returns an unchanged copy.
    pub fn pad(&self, size: i64, value: impl Into<Value>) -> Collection {
        let target = usize::try_from(size.unsigned_abs()).unwrap_or(usize::MAX);
        if target <= self.len() {
            return self.clone();
        }
        let value = value.into();
        let padding = std::iter::repeat_n((Key::Int(0), value), target - self.len());
        let entries = self.entries().iter().cloned();
        let padded: Vec<_> = if size > 0 {
            entries.chain(padding).collect()
        } else {
            padding.chain(entries).collect()
        };
        self.derive(renumber_int_keys(padded))
    }
}

fn walk_entries<D, F>(collection: &mut Collection, f: &mut F, data: &D, recursive: bool)
where
    D: ?Sized,
    F: FnMut(&mut Value, &Key, &D),
{
    for (key, value) in collection.iter_mut() {
        match value {
            Value::Collection(inner) if recursive => walk_entries(inner, f, data, recursive),
            value => f(value, key, data),
        }
    }
}
