//! Console output formatting

pub mod summary;
