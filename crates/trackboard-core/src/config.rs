//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! the remote document URL, the header the API key travels in, and an
//! optional cache directory override.
//!
//! Configuration is stored at `~/.config/trackboard/config.json`. The
//! `TRACKBOARD_REMOTE_URL` environment variable overrides the stored URL.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::remote::DEFAULT_AUTH_HEADER;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "trackboard";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const REMOTE_URL_ENV: &str = "TRACKBOARD_REMOTE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    pub remote_url: Option<String>,
    pub auth_header: Option<String>,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.cache_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Remote URL from the environment, else from the file. Blank means none.
    pub fn remote_url(&self) -> Option<String> {
        std::env::var(REMOTE_URL_ENV)
            .ok()
            .or_else(|| self.remote_url.clone())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    pub fn auth_header(&self) -> &str {
        self.auth_header.as_deref().unwrap_or(DEFAULT_AUTH_HEADER)
    }
}
