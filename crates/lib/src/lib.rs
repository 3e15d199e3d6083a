//!
//! Kollect: fluent ordered key/value collections.
//!
//! This library provides an associative-array style container with a large,
//! chainable set of operations for transforming, filtering, sorting, slicing
//! and exporting data.
//!
//! ## Core Concepts
//!
//! * **Collections (`collection::Collection`)**: Ordered key/value containers. Iteration follows insertion order, appends use the next integer key, and cloning is cheap thanks to copy-on-write storage.
//! * **Keys (`collection::Key`)**: Either a 64-bit integer or a string. Strings spelling a canonical integer are normalized to integer keys once, on insertion.
//! * **Values (`collection::Value`)**: Dynamically typed entries: null, booleans, numbers, text, nested collections, or opaque host objects.
//! * **Objects (`collection::Object`)**: Capability trait through which host values expose fields, methods and string forms to the collection.
//! * **Paths**: String keys such as `"user/profile/name"` address nested values. The delimiter is configurable process-wide (`config`) and per collection.
//! * **Dispatch (`dispatch::MethodRegistry`)**: Caller-owned registry of named methods, falling back to calling the method on every element.

pub mod collection;
pub mod config;
pub mod constants;
pub mod dispatch;

pub use collection::{
    Collection, CollectionError, Fallback, JsonOptions, Key, Object, SortFlags, SortMode, Value,
};

/// Result type used throughout the Kollect library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Kollect library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured collection errors from the collection module
    #[error(transparent)]
    Collection(CollectionError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Collection(_) => "collection",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates an element was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_not_found_error(),
            _ => false,
        }
    }

    /// Check if this error is an argument validation failure.
    pub fn is_invalid_argument(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_invalid_argument(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Collection(err) => err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is a JSON encoding or decoding failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }

    /// Returns the structured collection error, if this is one.
    pub fn as_collection_error(&self) -> Option<&CollectionError> {
        match self {
            Error::Collection(err) => Some(err),
            _ => None,
        }
    }
}
