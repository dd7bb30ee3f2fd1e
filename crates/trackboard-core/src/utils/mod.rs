//! Shared formatting helpers.

pub mod format;

pub use format::{format_age, format_optional, truncate_chars, truncate_string};
