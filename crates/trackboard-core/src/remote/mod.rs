//! Remote mirror module for the shared JSON document.
//!
//! This module provides the `RemoteMirror` trait and `HttpMirror`, which
//! reads the whole document with `GET {base}/latest` and overwrites it with
//! `PUT {base}`. There are no partial updates: every write replaces the
//! document, and concurrent writers lose data to whoever writes last.
//!
//! Authentication is a single static header (by default `X-Master-Key`).

pub mod error;
pub mod mirror;

pub use error::MirrorError;
pub use mirror::{HttpMirror, OfflineMirror, RemoteMirror, DEFAULT_AUTH_HEADER};
