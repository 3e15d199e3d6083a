//! Reordering: sorts, reverse, shuffle and random sampling.
//!
//! In-place operations move the entries out of the collection, reorder them
//! and put them back, so comparators only ever see a snapshot. All sorts are
//! stable: entries that compare equal keep their relative order.

use std::cmp::Ordering;

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use super::{Collection, CollectionError, Key, SortFlags, Value};
use crate::Result;

impl Collection {
    /// Sorts by value ascending and renumbers keys `0..n`.
    ///
    /// ```
    /// # use kollect::{SortFlags, kollect};
    /// let mut c = kollect!["b" => "img12", "a" => "img10", "c" => "img2"];
    /// c.sort(SortFlags::NATURAL);
    /// assert_eq!(c, kollect!["img2", "img10", "img12"]);
    /// ```
    pub fn sort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_values(|a, b| flags.compare(a, b))
    }

    /// Sorts by value descending and renumbers keys `0..n`.
    pub fn rsort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_values(|a, b| flags.compare(b, a))
    }

    /// Sorts by value ascending, keeping keys attached to their values.
    pub fn asort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_entries(|(_, a), (_, b)| flags.compare(a, b))
    }

    /// Sorts by value descending, keeping keys attached to their values.
    pub fn arsort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_entries(|(_, a), (_, b)| flags.compare(b, a))
    }

    /// Sorts by key ascending.
    pub fn ksort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_entries(|(a, _), (b, _)| flags.compare_keys(a, b))
    }

    /// Sorts by key descending.
    pub fn krsort(&mut self, flags: SortFlags) -> &mut Self {
        self.reorder_entries(|(a, _), (b, _)| flags.compare_keys(b, a))
    }

    /// Sorts by value with `cmp` and renumbers keys `0..n`.
    pub fn usort<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.reorder_values(|a, b| cmp(a, b))
    }

    /// Sorts by value with `cmp`, keeping keys attached to their values.
    pub fn uasort<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.reorder_entries(|(_, a), (_, b)| cmp(a, b))
    }

    /// Sorts by key with `cmp`.
    pub fn uksort<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.reorder_entries(|(a, _), (b, _)| cmp(a, b))
    }

    /// Reverses the order of the entries. Keys are kept.
    pub fn reverse(&mut self) -> &mut Self {
        let mut entries = self.take_entries();
        entries.reverse();
        self.replace_entries(entries);
        self
    }

    /// Shuffles the entries using the thread-local generator.
    ///
    /// Keys are renumbered `0..n` unless `preserve_keys` is set, in which case
    /// each key stays attached to its value.
    pub fn shuffle(&mut self, preserve_keys: bool) -> &mut Self {
        self.shuffle_with(preserve_keys, &mut rand::thread_rng())
    }

    /// Like [`Collection::shuffle`], drawing from `rng`.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, preserve_keys: bool, rng: &mut R) -> &mut Self {
        let mut entries = self.take_entries();
        entries.shuffle(rng);
        if preserve_keys {
            self.replace_entries(entries);
        } else {
            self.replace_entries(
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, (_, value))| (Key::from(i), value)),
            );
        }
        self
    }

    /// Returns up to `max` distinct entries picked at random, with their keys,
    /// in random order.
    ///
    /// When `max` is at least the length, every entry is returned in random
    /// order. An empty collection gives an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] when `max` is 0.
    pub fn random(&self, max: usize) -> Result<Collection> {
        self.random_with(max, &mut rand::thread_rng())
    }

    /// Like [`Collection::random`], drawing from `rng`.
    pub fn random_with<R: Rng + ?Sized>(&self, max: usize, rng: &mut R) -> Result<Collection> {
        if max < 1 {
            return Err(CollectionError::invalid_argument("max", "must be 1 or greater").into());
        }
        let amount = max.min(self.len());
        debug!(len = self.len(), amount, "Sampling random entries");
        let entries = self.entries();
        Ok(self.derive(
            rand::seq::index::sample(rng, self.len(), amount)
                .into_iter()
                .map(|i| entries[i].clone()),
        ))
    }

    fn reorder_values<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut values: Vec<Value> = self.take_entries().into_iter().map(|(_, v)| v).collect();
        values.sort_by(|a, b| cmp(a, b));
        self.replace_entries(
            values
                .into_iter()
                .enumerate()
                .map(|(i, value)| (Key::from(i), value)),
        );
        self
    }

    fn reorder_entries<F>(&mut self, mut cmp: F) -> &mut Self
    where
        F: FnMut(&(Key, Value), &(Key, Value)) -> Ordering,
    {
        let mut entries = self.take_entries();
        entries.sort_by(|a, b| cmp(a, b));
        self.replace_entries(entries);
        self
    }
}
