use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use super::{RecordStore, StorageError};

/// JSON array on disk, rewritten in full on every save.
///
/// Saves go to a sibling temp file which is then renamed over the target,
/// so concurrent readers see either the old or the new collection.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "records".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", name, Uuid::new_v4().simple()))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| StorageError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, records: &[T]) -> Result<(), StorageError> {
        let mut bytes = serde_json::to_vec(records)?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let temp = self.temp_path();
        let written = async {
            let mut file = tokio::fs::File::create(&temp).await?;
            file.write_all(&bytes).await?;
            file.sync_all().await?;
            tokio::fs::rename(&temp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(self.io_error(e));
        }

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
