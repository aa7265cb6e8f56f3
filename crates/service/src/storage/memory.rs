use async_trait::async_trait;
use models::Collection;
use tokio::sync::RwLock;

use super::CollectionStore;
use crate::errors::StorageError;

/// Process-lifetime collection with no durability.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Collection) -> Self {
        Self { inner: RwLock::new(records) }
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn load(&self) -> Result<Collection, StorageError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        *self.inner.write().await = collection.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
