//! Export to plain Rust data and JSON, and serde support.
//!
//! A collection whose keys are exactly `0..n` in order serializes as a JSON
//! array; any other collection serializes as a JSON object with string keys.
//! Deserialization goes the other way: arrays become lists and object keys are
//! normalized like any other key, so `{"0": "a", "1": "b"}` reads back as a
//! list.

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use super::{Collection, Key, Value};
use crate::Result;

/// Options for [`Collection::to_json`].
///
/// ```
/// # use kollect::{JsonOptions, kollect};
/// let c = kollect!["a", "b"];
/// assert_eq!(c.to_json(JsonOptions::default()).unwrap(), r#"["a","b"]"#);
/// assert_eq!(
///     c.to_json(JsonOptions::default().force_object()).unwrap(),
///     r#"{"0":"a","1":"b"}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonOptions {
    /// Indent the output
    pub pretty: bool,
    /// Encode lists as objects too, at every depth
    pub force_object: bool,
}

impl JsonOptions {
    /// Builder method enabling indented output
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Builder method encoding every collection as an object
    pub fn force_object(mut self) -> Self {
        self.force_object = true;
        self
    }
}

impl Collection {
    /// Returns the entries with nested collections materialized recursively.
    ///
    /// The result shares no storage with this collection and
    /// `Collection::from_entries(c.to_array()) == c`.
    pub fn to_array(&self) -> Vec<(Key, Value)> {
        self.iter()
            .map(|(key, value)| (key.clone(), value.detached()))
            .collect()
    }

    /// Returns the values in order, dropping the keys.
    pub fn to_vec(&self) -> Vec<Value> {
        self.values().cloned().collect()
    }

    /// Encodes the collection as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialize`] if encoding fails.
    pub fn to_json(&self, options: JsonOptions) -> Result<String> {
        let json = self.json_value(options.force_object)?;
        let encoded = if options.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(encoded)
    }

    /// Converts the collection into a [`serde_json::Value`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialize`] if an element cannot be encoded.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        self.json_value(false)
    }

    /// Compact JSON form used where a string representation is needed and
    /// failure is not an option. Unencodable input gives an empty string.
    pub(crate) fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parses a JSON document.
    ///
    /// A scalar document becomes a single-element list.
    ///
    /// ```
    /// # use kollect::{Collection, Value};
    /// let c = Collection::from_json(r#"{"name": "x", "tags": ["a", "b"]}"#).unwrap();
    /// assert_eq!(c.get("tags/1"), Some(Value::from("b")));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialize`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Collection> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Collection::from(value))
    }

    fn json_value(&self, force_object: bool) -> Result<serde_json::Value> {
        let json = if self.is_list() && !force_object {
            serde_json::Value::Array(
                self.values()
                    .map(|value| json_of(value, force_object))
                    .collect::<Result<_>>()?,
            )
        } else {
            serde_json::Value::Object(
                self.iter()
                    .map(|(key, value)| {
                        json_of(value, force_object).map(|json| (key.to_string(), json))
                    })
                    .collect::<Result<_>>()?,
            )
        };
        Ok(json)
    }
}

fn json_of(value: &Value, force_object: bool) -> Result<serde_json::Value> {
    match value {
        Value::Collection(c) => c.json_value(force_object),
        other => Ok(serde_json::to_value(other)?),
    }
}

impl Serialize for Collection {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Collection::from)
    }
}
