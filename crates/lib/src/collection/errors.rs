//! Error types for collection operations.
//!
//! This module defines structured error types for the collection engine,
//! providing context for argument validation failures, type mismatches during
//! string coercion and missing elements.

use thiserror::Error;

/// Structured error types for collection operations.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    /// A size, depth or count argument is outside its domain
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A value could not be used as the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// No element exists for the requested key or position
    #[error("Element not found: {key}")]
    ElementNotFound { key: String },

    /// Caller-defined failure, typically raised through an accessor fallback
    #[error("{reason}")]
    Custom { reason: String },
}

impl CollectionError {
    /// Shorthand for an [`CollectionError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CollectionError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CollectionError::Custom`] error.
    pub fn custom(reason: impl Into<String>) -> Self {
        CollectionError::Custom {
            reason: reason.into(),
        }
    }

    /// Check if this error is an argument validation failure
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CollectionError::InvalidArgument { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, CollectionError::TypeMismatch { .. })
    }

    /// Check if this error is related to element lookup
    pub fn is_not_found_error(&self) -> bool {
        matches!(self, CollectionError::ElementNotFound { .. })
    }

    /// Get the argument name if this is an argument error
    pub fn argument(&self) -> Option<&str> {
        match self {
            CollectionError::InvalidArgument { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            CollectionError::ElementNotFound { key } => Some(key),
            _ => None,
        }
    }
}

impl From<CollectionError> for crate::Error {
    fn from(err: CollectionError) -> Self {
        crate::Error::Collection(err)
    }
}
