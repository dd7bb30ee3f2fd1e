//! trackboard-core - record models, local cache, remote mirror and the
//! storage client that ties them together.
//!
//! A typical setup builds one [`StorageClient`] and passes it to whatever
//! needs persistence:
//!
//! ```no_run
//! use trackboard_core::{FileCache, HttpMirror, StorageClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let cache = FileCache::new("/tmp/trackboard".into())?;
//! let mirror = HttpMirror::new("https://store.example/b/progress")?
//!     .with_auth("X-Master-Key", "secret")?;
//! let mut client = StorageClient::new(cache, mirror);
//! let activities = client.get_daily_activities().await?;
//! println!("{} activities", activities.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cache;
pub mod config;
pub mod forms;
pub mod models;
pub mod remote;
pub mod storage;
pub mod utils;

pub use cache::{CacheError, FileCache, LocalCache, MemoryCache};
pub use config::Config;
pub use forms::FormError;
pub use remote::{HttpMirror, MirrorError, OfflineMirror, RemoteMirror};
pub use storage::{StorageClient, StorageError, SyncOutcome};
