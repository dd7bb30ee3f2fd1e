//! Credential handling for the remote mirror.
//!
//! The API key for the remote document is kept in the OS keychain via
//! keyring, one entry per remote URL. `TRACKBOARD_API_KEY` takes precedence
//! when set.

pub mod credentials;

pub use credentials::{CredentialStore, API_KEY_ENV};
