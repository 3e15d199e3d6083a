//! Value and key comparison for the sort operations.
//!
//! [`SortFlags`] selects how two values are ordered:
//!
//! - [`SortMode::Regular`] - type-aware: numbers and numeric strings compare
//!   numerically and before other strings, collections after every scalar
//! - [`SortMode::Numeric`] - both sides coerced to numbers
//! - [`SortMode::String`] - both sides compared by their string form
//! - [`SortMode::LocaleString`] - collation-style string order: case-folded
//!   primary order with a bytewise tiebreak
//! - [`SortMode::Natural`] - string order where digit runs compare by numeric
//!   value, so `"img2" < "img10"`
//!
//! The case-insensitive flag applies to the string and natural modes.

use std::cmp::Ordering;

use super::{Key, Value, value::parse_number};

/// How values are compared when sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Type-aware comparison
    #[default]
    Regular,
    /// Numeric coercion
    Numeric,
    /// String representation
    String,
    /// Collation-style string comparison
    LocaleString,
    /// Embedded-number-aware string comparison
    Natural,
}

/// Comparison mode plus the orthogonal case-insensitive flag.
///
/// ```
/// use kollect::{SortFlags, SortMode};
///
/// let flags = SortFlags::NATURAL.case_insensitive();
/// assert_eq!(flags.mode, SortMode::Natural);
/// assert!(flags.fold_case);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortFlags {
    /// Comparison mode
    pub mode: SortMode,
    /// Ignore case in the string and natural modes
    pub fold_case: bool,
}

impl SortFlags {
    pub const REGULAR: SortFlags = SortFlags::new(SortMode::Regular);
    pub const NUMERIC: SortFlags = SortFlags::new(SortMode::Numeric);
    pub const STRING: SortFlags = SortFlags::new(SortMode::String);
    pub const LOCALE_STRING: SortFlags = SortFlags::new(SortMode::LocaleString);
    pub const NATURAL: SortFlags = SortFlags::new(SortMode::Natural);

    /// Flags for `mode`, case-sensitive.
    pub const fn new(mode: SortMode) -> Self {
        Self {
            mode,
            fold_case: false,
        }
    }

    /// Builder method enabling case-insensitive comparison
    pub const fn case_insensitive(mut self) -> Self {
        self.fold_case = true;
        self
    }

    /// Compares two values under these flags.
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match self.mode {
            SortMode::Regular => compare_regular(a, b),
            SortMode::Numeric => compare_f64(a.coerce_number(), b.coerce_number()),
            SortMode::String => {
                compare_text(&a.comparison_text(), &b.comparison_text(), self.fold_case)
            }
            SortMode::LocaleString => {
                compare_collated(&a.comparison_text(), &b.comparison_text())
            }
            SortMode::Natural => {
                natural_cmp(&a.comparison_text(), &b.comparison_text(), self.fold_case)
            }
        }
    }

    /// Compares two keys under these flags.
    pub fn compare_keys(&self, a: &Key, b: &Key) -> Ordering {
        match (self.mode, a, b) {
            (SortMode::Regular | SortMode::Numeric, Key::Int(x), Key::Int(y)) => x.cmp(y),
            _ => self.compare(&Value::from(a.clone()), &Value::from(b.clone())),
        }
    }
}

/// NaN sorts after every other number so the order stays total.
fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

fn compare_text(a: &str, b: &str, fold_case: bool) -> Ordering {
    if fold_case {
        a.to_lowercase().cmp(&b.to_lowercase())
    } else {
        a.cmp(b)
    }
}

fn compare_collated(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// A number, or the number numeric text parses to.
#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

fn number_of(value: &Value) -> Option<Number> {
    match value {
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(f) => Some(Number::Float(*f)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .map(Number::Int)
            .or_else(|| parse_number(s).map(Number::Float)),
        _ => None,
    }
}

/// Exact comparison, without rounding large integers through `f64`.
fn compare_numbers(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x.cmp(&y),
        (Number::Float(x), Number::Float(y)) => compare_f64(x, y),
        (Number::Int(i), Number::Float(f)) => compare_int_float(i, f),
        (Number::Float(f), Number::Int(i)) => compare_int_float(i, f).reverse(),
    }
}

fn compare_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float past i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| compare_f64(0.0, f - whole))
}

/// Rank of a value's kind for comparisons across kinds.
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null | Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::Text(_) if number_of(value).is_some() => 1,
        Value::Text(_) => 2,
        Value::Object(_) => 3,
        Value::Collection(_) => 4,
    }
}

/// Type-aware comparison. This is a total order, so it is safe to sort with.
///
/// Kinds are ranked in this order, lowest first:
///
/// 1. null and booleans, by truthiness
/// 2. numbers and numeric text, by numeric value (NaN last)
/// 3. other text, bytewise
/// 4. objects, by their text form and then their type name
/// 5. collections, by size and then entry by entry (key, then value)
pub fn compare_regular(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null | Value::Bool(_), Value::Null | Value::Bool(_)) => {
            a.is_truthy().cmp(&b.is_truthy())
        }
        (Value::Collection(x), Value::Collection(y)) => x.len().cmp(&y.len()).then_with(|| {
            x.iter()
                .zip(y.iter())
                .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| compare_regular(va, vb)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        }),
        (Value::Object(x), Value::Object(y)) => x
            .to_text()
            .cmp(&y.to_text())
            .then_with(|| x.type_name().cmp(y.type_name())),
        _ => match (number_of(a), number_of(b)) {
            (Some(x), Some(y)) => compare_numbers(x, y),
            _ => type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
                (Value::Text(x), Value::Text(y)) => x.cmp(y),
                _ => Ordering::Equal,
            }),
        },
    }
}

/// Natural order comparison: runs of digits compare by numeric value.
///
/// Runs starting with `0` are treated as fractional parts and compared digit
/// by digit from the left, so `"1.05" < "1.5"`. Whitespace is skipped.
pub fn natural_cmp(a: &str, b: &str, fold_case: bool) -> Ordering {
    let (a, b): (Vec<char>, Vec<char>) = if fold_case {
        (a.to_lowercase().chars().collect(), b.to_lowercase().chars().collect())
    } else {
        (a.chars().collect(), b.chars().collect())
    };
    let (mut i, mut j) = (0, 0);

    loop {
        while a.get(i).is_some_and(|c| c.is_whitespace()) {
            i += 1;
        }
        while b.get(j).is_some_and(|c| c.is_whitespace()) {
            j += 1;
        }

        let (ca, cb) = match (a.get(i), b.get(j)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => (*ca, *cb),
        };

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let run_a = digit_run(&a[i..]);
            let run_b = digit_run(&b[j..]);
            let ordering = if ca == '0' || cb == '0' {
                compare_left_aligned(run_a, run_b)
            } else {
                run_a.len().cmp(&run_b.len()).then_with(|| run_a.cmp(run_b))
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
            i += run_a.len();
            j += run_b.len();
            continue;
        }

        if ca != cb {
            return ca.cmp(&cb);
        }
        i += 1;
        j += 1;
    }
}

fn digit_run(chars: &[char]) -> &[char] {
    let len = chars.iter().take_while(|c| c.is_ascii_digit()).count();
    &chars[..len]
}

fn compare_left_aligned(a: &[char], b: &[char]) -> Ordering {
    for k in 0.. {
        match (a.get(k), b.get(k)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x != y => return x.cmp(y),
            _ => {}
        }
    }
    Ordering::Equal
}
