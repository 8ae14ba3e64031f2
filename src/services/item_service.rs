use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::{next_id, Item, ItemPatch, NewItem};
use crate::storage::{RecordStore, StorageError};

/// The item catalog.
///
/// The backend is the only copy of the data. Every mutation holds the write
/// lock across its whole load-modify-save cycle, so two creates can never
/// hand out the same id and no update is lost to an interleaved write.
pub struct ItemStore {
    backend: Arc<dyn RecordStore<Item>>,
    lock: RwLock<()>,
}

impl ItemStore {
    pub fn new(backend: Arc<dyn RecordStore<Item>>) -> Self {
        Self {
            backend,
            lock: RwLock::new(()),
        }
    }

    /// Add an item, assigning it the next free id
    pub async fn create(&self, new: NewItem) -> Result<Item, StorageError> {
        let _guard = self.lock.write().await;

        let mut items = self.backend.load().await?;
        let id = next_id(&items).ok_or(StorageError::IdsExhausted)?;
        let item = Item::from_new(id, new);
        items.push(item.clone());
        self.backend.save(&items).await?;

        info!(store = %self.backend.location(), "Created item {} ({})", item.id, item.name);
        Ok(item)
    }

    /// All items in stored order
    pub async fn list(&self) -> Result<Vec<Item>, StorageError> {
        let _guard = self.lock.read().await;
        self.backend.load().await
    }

    /// First item with the given id
    pub async fn get(&self, id: i64) -> Result<Option<Item>, StorageError> {
        Ok(self.list().await?.into_iter().find(|item| item.id == id))
    }

    /// Apply `patch` to every item whose id is listed.
    ///
    /// Returns the ids that matched at least one item, whether or not a field
    /// actually changed. Unknown ids are left out of the result.
    pub async fn bulk_update(
        &self,
        ids: &[i64],
        patch: &ItemPatch,
    ) -> Result<BTreeMap<i64, bool>, StorageError> {
        let _guard = self.lock.write().await;

        let mut items = self.backend.load().await?;
        let mut updated = BTreeMap::new();

        for &id in ids {
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.apply(patch);
                updated.insert(id, true);
            }
        }

        if !updated.is_empty() {
            self.backend.save(&items).await?;
            info!(store = %self.backend.location(), "Updated items {:?}", updated.keys().collect::<Vec<_>>());
        }

        Ok(updated)
    }
}
