//! Collection integration tests
//!
//! Tests are organized by operation family, with the end-to-end scenarios kept
//! in their own module.

mod export;
mod ordering;
mod scenarios;
mod storage;
mod transform;
