use thiserror::Error;

use crate::cache::CacheError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Local cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Storage client is not initialized")]
    NotReady,
}
