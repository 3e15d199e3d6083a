//! Folding a collection into a single value.

use super::{Collection, CollectionError, Key, Value, compare::compare_regular};
use crate::Result;

impl Collection {
    /// Left fold over the values in order.
    ///
    /// The collection is left untouched: `reduce` borrows it, so the same
    /// collection can be folded again or used afterwards.
    ///
    /// ```
    /// # use kollect::kollect;
    /// let c = kollect![1, 2, 3];
    /// let total = c.reduce(|acc, v| acc + v.as_int().unwrap_or(0), 0);
    /// assert_eq!(total, 6);
    /// assert_eq!(c.len(), 3);
    /// ```
    pub fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        F: FnMut(A, &Value) -> A,
    {
        self.values().fold(initial, |acc, value| f(acc, value))
    }

    /// Concatenates the string forms of the values, separated by `glue`.
    ///
    /// `null` and `false` contribute an empty string, `true` contributes `"1"`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::TypeMismatch`] for a nested collection or an
    /// object without a string form.
    pub fn join(&self, glue: &str) -> Result<String> {
        let mut parts = Vec::with_capacity(self.len());
        for value in self.values() {
            let text = value.to_text().ok_or_else(|| CollectionError::TypeMismatch {
                expected: "stringable value".to_string(),
                actual: value.type_name().to_string(),
            })?;
            parts.push(text);
        }
        Ok(parts.join(glue))
    }

    /// Number of entries, same as [`Collection::len`].
    pub fn count(&self) -> usize {
        self.len()
    }

    /// Counts entries per key computed by `f`, in first-seen order.
    ///
    /// ```
    /// # use kollect::{Key, kollect};
    /// let c = kollect!["a", "b", "a"];
    /// let counts = c.count_by(|v, _| Key::from(v.as_text().unwrap_or_default()));
    /// assert_eq!(counts, kollect!["a" => 2, "b" => 1]);
    /// ```
    pub fn count_by<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Value, &Key) -> Key,
    {
        let mut counts = self.derive(std::iter::empty());
        for (key, value) in self {
            let bucket = f(value, key);
            let current = counts.get_key(&bucket).and_then(Value::as_int).unwrap_or(0);
            counts.set(bucket, current + 1);
        }
        counts
    }

    /// Sum of the values.
    ///
    /// An all-integer collection sums to [`Value::Int`] as long as it does not
    /// overflow, anything else to [`Value::Float`]. Text contributes its
    /// numeric prefix, nested collections are skipped.
    pub fn sum(&self) -> Value {
        let mut int_total: Option<i64> = Some(0);
        let mut float_total = 0.0;
        for value in self.values() {
            match value {
                Value::Collection(_) => continue,
                Value::Int(n) => int_total = int_total.and_then(|total| total.checked_add(*n)),
                _ => int_total = None,
            }
            float_total += value.coerce_number();
        }
        match int_total {
            Some(total) => Value::Int(total),
            None => Value::Float(float_total),
        }
    }

    /// Arithmetic mean of the values, `None` when empty.
    pub fn avg(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let total = self
            .values()
            .filter(|value| !value.is_collection())
            .map(Value::coerce_number)
            .sum::<f64>();
        Some(total / self.len() as f64)
    }

    /// Smallest value under the regular comparison; the first one on ties.
    pub fn min(&self) -> Option<&Value> {
        self.values()
            .reduce(|min, value| if compare_regular(value, min).is_lt() { value } else { min })
    }

    /// Largest value under the regular comparison; the first one on ties.
    pub fn max(&self) -> Option<&Value> {
        self.values()
            .reduce(|max, value| if compare_regular(value, max).is_gt() { value } else { max })
    }
}
