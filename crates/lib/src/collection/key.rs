//! Keys for collection entries.
//!
//! A [`Key`] is either a 64-bit integer or a string. Keys are classified once,
//! when they are created: a string that spells a canonical decimal integer
//! (`"0"`, `"42"`, `"-7"`, but not `"007"`, `"+1"`, `"-0"` or `"1.0"`) becomes
//! [`Key::Int`], everything else stays [`Key::Str`].

use std::{cmp::Ordering, fmt};

/// Key of a collection entry.
///
/// ```
/// # use kollect::Key;
/// assert_eq!(Key::from("12"), Key::Int(12));
/// assert_eq!(Key::from("012"), Key::Str("012".to_string()));
/// assert_eq!(Key::from(3), Key::Int(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Integer key
    Int(i64),
    /// String key that is not a canonical integer literal
    Str(String),
}

impl Key {
    /// Normalizes a string into a key.
    pub fn parse(s: &str) -> Self {
        match parse_canonical_int(s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s.to_string()),
        }
    }

    /// Converts a value into a key, if it has a key form.
    ///
    /// Integers and text convert directly (text is normalized), floats are
    /// truncated and booleans become 0 or 1. Null, collections and objects
    /// have no key form.
    pub fn from_value(value: &super::Value) -> Option<Key> {
        use super::Value;
        match value {
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Text(s) => Some(Key::parse(s)),
            Value::Float(f) if f.is_finite() => Some(Key::Int(f.trunc() as i64)),
            Value::Bool(b) => Some(Key::Int(*b as i64)),
            _ => None,
        }
    }

    /// Returns true for integer keys
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Returns true for string keys
    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    /// Returns the integer if this is an integer key
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// Returns the string if this is a string key
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }
}

/// Parses `s` as a canonical decimal integer literal.
///
/// Canonical means the string is exactly what formatting the integer would
/// produce: no sign on positives, no leading zeros, no `-0`, no whitespace.
pub(crate) fn parse_canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let bytes = digits.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' && (bytes.len() > 1 || digits.len() != s.len()) {
        return None;
    }
    s.parse().ok()
}

impl Ord for Key {
    /// Integer keys compare numerically and sort before string keys, which
    /// compare bytewise.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::Int(_), Key::Str(_)) => Ordering::Less,
            (Key::Str(_), Key::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::parse(value)
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        match parse_canonical_int(&value) {
            Some(n) => Key::Int(n),
            None => Key::Str(value),
        }
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::parse(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<u32> for Key {
    fn from(value: u32) -> Self {
        Key::Int(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Int(value as i64)
    }
}

impl PartialEq<i64> for Key {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Key::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Key {
    fn eq(&self, other: &i32) -> bool {
        matches!(self, Key::Int(n) if *n == *other as i64)
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        *self == Key::parse(other)
    }
}

impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Key::Int(n) => serializer.collect_str(n),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}
