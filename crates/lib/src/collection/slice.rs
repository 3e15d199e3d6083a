//! Positional sub-ranges: [`Collection::slice`] and [`Collection::splice`].
//!
//! Both address a range by `offset` and `length`:
//!
//! - a negative `offset` counts from the end
//! - a positive `length` caps the range size
//! - a negative `length` stops that many entries before the end
//! - no `length` runs to the end
//!
//! Out-of-range values are clamped, so the range is never invalid, only
//! possibly empty.

use std::ops::Range;

use super::{Collection, Key, renumber_int_keys};

/// Resolves `offset`/`length` against `len` into a clamped position range.
fn resolve_range(len: usize, offset: i64, length: Option<i64>) -> Range<usize> {
    let len_i = i64::try_from(len).unwrap_or(i64::MAX);
    let start = if offset < 0 {
        len_i.saturating_add(offset).max(0)
    } else {
        offset.min(len_i)
    };
    let end = match length {
        None => len_i,
        Some(l) if l >= 0 => start.saturating_add(l).min(len_i),
        Some(l) => len_i.saturating_add(l).max(start),
    };
    // Both bounds lie in 0..=len here
    (start as usize)..(end as usize)
}

impl Collection {
    /// Returns the addressed range as a new collection, keys preserved.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect!["a", "b", "c", "d"];
    /// assert_eq!(c.slice(-2, Some(-1)), kollect![2 => "c"]);
    /// assert_eq!(c.slice(1, Some(2)), kollect![1 => "b", 2 => "c"]);
    /// assert_eq!(c.slice(3, None), kollect![3 => "d"]);
    /// ```
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        let range = resolve_range(self.len(), offset, length);
        self.derive(self.entries()[range].iter().cloned())
    }

    /// Removes the addressed range, inserting the values of `replacement` in
    /// its place, and returns the removed values keyed `0..n`.
    ///
    /// Afterwards the integer keys of `self` are renumbered from 0 and its
    /// string keys are kept. Replacement values are inserted under integer
    /// keys, whatever keys they had.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let mut c = kollect!["a", "b", "c", "d"];
    /// let removed = c.splice(1, Some(2), kollect!["x"]);
    /// assert_eq!(removed, kollect!["b", "c"]);
    /// assert_eq!(c, kollect!["a", "x", "d"]);
    /// ```
    pub fn splice(
        &mut self,
        offset: i64,
        length: Option<i64>,
        replacement: impl Into<Collection>,
    ) -> Collection {
        let range = resolve_range(self.len(), offset, length);
        let replacement = replacement.into();
        let mut entries = self.take_entries();
        let removed: Vec<_> = entries
            .splice(
                range,
                replacement
                    .values()
                    .cloned()
                    .map(|value| (Key::Int(0), value)),
            )
            .map(|(_, value)| value)
            .collect();
        self.replace_entries(renumber_int_keys(entries));
        self.derive_values(removed)
    }
}
