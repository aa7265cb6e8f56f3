//! Runtime wiring: one store per resource, each owning the port chosen by
//! the storage config.
//!
//! Binaries go through here instead of building ports themselves, so the
//! server and the seed CLI always agree on where a collection lives.

use std::collections::BTreeMap;
use std::sync::Arc;

use configs::{StorageBackend, StorageConfig};
use models::ResourceDef;
use tracing::{info, warn};

use crate::errors::StorageError;
use crate::resource::ResourceStore;
use crate::storage::{CollectionStore, JsonFileStore, MemoryStore};

/// Ensure the data directory exists; warn on a missing seed file.
pub async fn ensure_env(storage: &StorageConfig, seed_file: Option<&std::path::Path>) -> anyhow::Result<()> {
    common::env::ensure_env(&storage.data_dir, seed_file).await
}

/// Build the persistence port for `def` according to `storage`.
pub async fn open_port(def: &ResourceDef, storage: &StorageConfig) -> Result<Arc<dyn CollectionStore>, StorageError> {
    let port: Arc<dyn CollectionStore> = match storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(JsonFileStore::open(storage.collection_path(def.name)).await?),
    };
    Ok(port)
}

/// Open the store for `def` and probe its initial content.
///
/// A collection that cannot be read is logged and left in place: the
/// process still starts and requests against it answer with a storage
/// failure until the file is repaired.
pub async fn open_store(def: ResourceDef, storage: &StorageConfig) -> Result<Arc<ResourceStore>, StorageError> {
    let port = open_port(&def, storage).await?;
    match port.load().await {
        Ok(records) => info!(resource = def.name, location = %port.describe(), records = records.len(), "collection_opened"),
        Err(e) => warn!(resource = def.name, location = %port.describe(), error = %e, "collection_unreadable"),
    }
    Ok(Arc::new(ResourceStore::new(def, port)))
}

/// Stores keyed by resource name.
#[derive(Clone, Default)]
pub struct ResourceRegistry {
    stores: BTreeMap<&'static str, Arc<ResourceStore>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store for every definition.
    pub async fn open<I>(defs: I, storage: &StorageConfig) -> Result<Self, StorageError>
    where
        I: IntoIterator<Item = ResourceDef>,
    {
        let mut registry = Self::new();
        for def in defs {
            registry.insert(open_store(def, storage).await?);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, store: Arc<ResourceStore>) {
        self.stores.insert(store.name(), store);
    }

    pub fn get(&self, name: &str) -> Option<Arc<ResourceStore>> {
        self.stores.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stores.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ResourceStore>> {
        self.stores.values()
    }
}
