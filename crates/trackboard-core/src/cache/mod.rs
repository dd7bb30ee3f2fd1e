//! Local caching module for offline data access.
//!
//! This module provides the `LocalCache` trait and its two implementations:
//! - `FileCache`: one `<key>.json` file per record kind in a cache directory
//! - `MemoryCache`: process-local map, for ephemeral runs and tests
//!
//! Each key holds the JSON array for one record kind. Reads of an absent key
//! yield an empty list. There is no TTL and no size bound.

pub mod error;
pub mod local;

pub use error::CacheError;
pub use local::{CacheAges, FileCache, LocalCache, MemoryCache};
