//! Storage client combining the local cache and the remote mirror.
//!
//! `StorageClient` is the only persistence entry point the outer layers use.
//! It loads lazily on first access (remote first, local cache as fallback),
//! keeps one in-memory copy of the shared document, and on every save
//! overwrites the remote document and then the local cache.
//!
//! Every operation that touches the remote reports a `SyncOutcome` so callers
//! can tell a shared write from a local-only one.

pub mod client;
pub mod error;

pub use client::{StorageClient, SyncOutcome};
pub use error::StorageError;
