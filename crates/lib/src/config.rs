//! Process-wide configuration.
//!
//! The only process-wide setting is the default path delimiter used by
//! [`Collection::get`](crate::Collection::get), [`Collection::has`](crate::Collection::has)
//! and [`Collection::col`](crate::Collection::col) to split path keys.
//! Collections can override it per instance with
//! [`Collection::with_delimiter`](crate::Collection::with_delimiter).

use std::{
    borrow::Cow,
    sync::{PoisonError, RwLock},
};

use crate::{Result, collection::CollectionError, constants::DEFAULT_PATH_DELIMITER};

static PATH_DELIMITER: RwLock<Cow<'static, str>> =
    RwLock::new(Cow::Borrowed(DEFAULT_PATH_DELIMITER));

/// Returns the current process-wide path delimiter.
pub fn path_delimiter() -> String {
    PATH_DELIMITER
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .to_string()
}

/// Replaces the process-wide path delimiter, returning the previous one.
///
/// # Errors
///
/// Returns [`CollectionError::InvalidArgument`] for an empty delimiter.
pub fn set_path_delimiter(delimiter: impl Into<String>) -> Result<String> {
    let delimiter = delimiter.into();
    if delimiter.is_empty() {
        return Err(CollectionError::invalid_argument("delimiter", "must not be empty").into());
    }
    tracing::debug!(delimiter = %delimiter, "Setting process-wide path delimiter");
    let mut guard = PATH_DELIMITER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let previous = std::mem::replace(&mut *guard, Cow::Owned(delimiter));
    Ok(previous.into_owned())
}

/// Restores the default path delimiter.
pub fn reset_path_delimiter() {
    let mut guard = PATH_DELIMITER
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = Cow::Borrowed(DEFAULT_PATH_DELIMITER);
}
