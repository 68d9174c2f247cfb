//! Key-value storage backends.
//!
//! [`KeyValueStorage`] mirrors the browser Web Storage API: string keys map to
//! string values, reads are infallible from the caller's point of view except
//! for backend I/O, and writes may be rejected (quota, I/O). The cart model
//! only ever touches a single key; see [`crate::cart::CartStorage`].
//!
//! # Backends
//!
//! - [`MemoryStorage`] - in-process map, used per request by the web binary
//!   and by tests (supports a byte quota and write-failure injection)
//! - [`FileStorage`] - one JSON object on disk, used by the CLI

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's byte quota.
    #[error("Quota exceeded writing {key}: needs {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The backend refused the write.
    #[error("Write failed for {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    /// Filesystem error from a disk-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A string key-value store.
///
/// Methods take `&self`; implementations provide their own interior
/// mutability so one backend can be shared by several components.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
