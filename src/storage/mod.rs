//! Record persistence backends.
//!
//! A store loads and saves an entire collection at once. Callers are
//! responsible for serializing read-modify-write cycles (see
//! [`crate::services`]); backends only guarantee that a `save` is never
//! observed half-written by a later `load`.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors from record backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode records: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("No ids left, largest stored id is i64::MAX")]
    IdsExhausted,
}

/// Whole-collection persistence for one entity type
#[async_trait]
pub trait RecordStore<T: Send + Sync>: Send + Sync {
    /// Load every record in stored order. A store that was never written is empty.
    async fn load(&self) -> Result<Vec<T>, StorageError>;

    /// Replace the stored collection with `records`
    async fn save(&self, records: &[T]) -> Result<(), StorageError>;

    /// Human-readable location, used in logs
    fn location(&self) -> String;
}
