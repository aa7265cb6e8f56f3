//! Persistence port for record collections.
//!
//! A port only knows how to read and write a whole [`Collection`]; the
//! resource store layers locking, validation and id allocation on top.

use async_trait::async_trait;
use models::Collection;

use crate::errors::StorageError;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Load/save contract over one collection.
///
/// `load` returns an empty collection only when nothing was ever stored;
/// unreadable or corrupt content is an error. `save` replaces the whole
/// collection or leaves the previous one intact.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn load(&self) -> Result<Collection, StorageError>;
    async fn save(&self, collection: &Collection) -> Result<(), StorageError>;
    /// Short human readable location, used in logs.
    fn describe(&self) -> String;
}
