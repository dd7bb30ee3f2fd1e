use anyhow::{Context, Result};
use keyring::Entry;
use tracing::debug;

const SERVICE_NAME: &str = "trackboard";

pub const API_KEY_ENV: &str = "TRACKBOARD_API_KEY";

pub struct CredentialStore;

impl CredentialStore {
    /// Store the API key for a remote URL in the OS keychain
    pub fn store(remote_url: &str, api_key: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, remote_url)
            .context("Failed to create keyring entry")?;
        entry
            .set_password(api_key)
            .context("Failed to store API key in keychain")?;
        Ok(())
    }

    /// Retrieve the API key for a remote URL from the OS keychain
    pub fn get(remote_url: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, remote_url)
            .context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve API key from keychain")
    }

    /// Delete the stored API key for a remote URL
    pub fn delete(remote_url: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, remote_url)
            .context("Failed to create keyring entry")?;
        entry
            .delete_credential()
            .context("Failed to delete API key from keychain")?;
        Ok(())
    }

    /// API key from the environment, else the keychain. `None` if neither has one.
    pub fn resolve(remote_url: &str) -> Option<String> {
        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()) {
            return Some(key);
        }
        match Self::get(remote_url) {
            Ok(key) => Some(key),
            Err(e) => {
                debug!(remote = remote_url, error = %e, "No API key in keychain");
                None
            }
        }
    }
}
