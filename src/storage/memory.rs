use async_trait::async_trait;
use std::sync::Mutex;

use super::{RecordStore, StorageError};

/// Process-local collection. Nothing survives a restart.
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> RecordStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.clone())
    }

    async fn save(&self, records: &[T]) -> Result<(), StorageError> {
        let mut stored = self.records.lock().unwrap_or_else(|e| e.into_inner());
        *stored = records.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
