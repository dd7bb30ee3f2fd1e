use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::CacheError;
use crate::models::RecordKind;
use crate::utils::format_age;

/// Key-value persistence for serialized record lists.
///
/// Implementors only move strings; the typed helpers `read` and `write`
/// handle JSON encoding.
pub trait LocalCache: Send + Sync {
    fn read_raw(&self, key: &str) -> Result<Option<String>, CacheError>;

    fn write_raw(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// When the entry was last written, if known.
    fn modified_at(&self, _key: &str) -> Option<DateTime<Utc>> {
        None
    }

    /// Read the list stored under `key`, or an empty list when absent.
    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, CacheError>
    where
        Self: Sized,
    {
        match self.read_raw(key)? {
            Some(contents) => serde_json::from_str(&contents).map_err(|source| {
                CacheError::Malformed {
                    key: key.to_string(),
                    source,
                }
            }),
            None => {
                debug!(key, "Cache miss, using empty list");
                Ok(Vec::new())
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), CacheError>
    where
        Self: Sized,
    {
        let contents = serde_json::to_string(records).map_err(|source| CacheError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.write_raw(key, &contents)
    }

    /// Human-readable age of every record kind's entry.
    fn ages(&self) -> CacheAges
    where
        Self: Sized,
    {
        let age = |kind: RecordKind| {
            self.modified_at(kind.key())
                .map(|at| format_age((Utc::now() - at).num_minutes()))
        };
        CacheAges {
            certificates: age(RecordKind::Certificates),
            final_projects: age(RecordKind::FinalProjects),
            mini_projects: age(RecordKind::MiniProjects),
            daily_activities: age(RecordKind::DailyActivities),
        }
    }
}

/// Cache backed by one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    pub fn new(cache_dir: PathBuf) -> Result<Self, CacheError> {
        std::fs::create_dir_all(&cache_dir).map_err(|source| CacheError::Io {
            key: cache_dir.display().to_string(),
            source,
        })?;
        Ok(Self { cache_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }
}

impl LocalCache for FileCache {
    fn read_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let path = self.cache_path(key);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| CacheError::Io {
                key: key.to_string(),
                source,
            })
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        // Unique temp file per write, renamed over the target
        let io_err = |source: std::io::Error| CacheError::Io {
            key: key.to_string(),
            source,
        };
        let mut tmp = tempfile::NamedTempFile::new_in(&self.cache_dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.persist(self.cache_path(key))
            .map_err(|e| io_err(e.error))?;
        Ok(())
    }

    fn modified_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let modified: SystemTime = std::fs::metadata(self.cache_path(key))
            .and_then(|m| m.modified())
            .ok()?;
        Some(DateTime::<Utc>::from(modified))
    }
}

/// Cache that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry with raw contents, bypassing encoding.
    #[cfg(test)]
    pub(crate) fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (value.to_string(), Utc::now()));
        }
        self
    }
}

impl LocalCache for MemoryCache {
    fn read_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.insert(key.to_string(), (value.to_string(), Utc::now()));
        Ok(())
    }

    fn modified_at(&self, key: &str) -> Option<DateTime<Utc>> {
        let entries = self.entries.lock().ok()?;
        entries.get(key).map(|(_, at)| *at)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheAges {
    pub certificates: Option<String>,
    pub final_projects: Option<String>,
    pub mini_projects: Option<String>,
    pub daily_activities: Option<String>,
}

impl CacheAges {
    pub fn get(&self, kind: RecordKind) -> Option<&str> {
        match kind {
            RecordKind::Certificates => self.certificates.as_deref(),
            RecordKind::FinalProjects => self.final_projects.as_deref(),
            RecordKind::MiniProjects => self.mini_projects.as_deref(),
            RecordKind::DailyActivities => self.daily_activities.as_deref(),
        }
    }

    /// Age of the first kind that has ever been written, or "never".
    pub fn last_updated(&self) -> String {
        RecordKind::ALL
            .iter()
            .find_map(|k| self.get(*k))
            .unwrap_or("never")
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
