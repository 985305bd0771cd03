//! Cache-related errors.

use thiserror::Error;

/// Errors that can occur when reading or writing a cache backend.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backing file could not be read or written.
    #[error("cache io: {0}")]
    Io(#[from] std::io::Error),

    /// Backing store holds data that does not decode.
    #[error("cache data is corrupt: {0}")]
    Corrupt(String),

    /// General cache error.
    #[error("cache error: {0}")]
    Other(String),
}
