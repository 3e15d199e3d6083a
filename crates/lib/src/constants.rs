//! Constants used throughout the kollect library.

/// Default separator between the segments of a path key such as `"a/b/c"`.
pub const DEFAULT_PATH_DELIMITER: &str = "/";

