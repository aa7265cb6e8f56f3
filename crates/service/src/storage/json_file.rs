use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::Collection;
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

use super::CollectionStore;
use crate::errors::StorageError;

/// Collection persisted as one pretty-printed JSON array.
///
/// Writes go to a sibling temp file which is fsynced and renamed over the
/// target, so readers see either the old document or the new one.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    /// Create the parent directory if needed. The file itself is only
    /// written on the first save.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StorageError> {
        let store = Self::new(path);
        if let Some(parent) = store.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Write { path: parent.to_path_buf(), source })?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn temp_path(&self) -> PathBuf {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let name = self
            .file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string());
        self.file_path.with_file_name(format!(".{name}.{suffix}.tmp"))
    }

    fn check_ids(&self, collection: &Collection) -> Result<(), StorageError> {
        let mut seen = HashSet::with_capacity(collection.len());
        for (index, record) in collection.iter().enumerate() {
            let id = record.id().ok_or_else(|| StorageError::Invalid {
                path: self.file_path.clone(),
                reason: format!("record at index {index} has no valid id"),
            })?;
            if !seen.insert(id.clone()) {
                return Err(StorageError::Invalid {
                    path: self.file_path.clone(),
                    reason: format!("duplicate id {id}"),
                });
            }
        }
        Ok(())
    }

    async fn write_atomically(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(tmp, &self.file_path).await
    }
}

#[async_trait]
impl CollectionStore for JsonFileStore {
    async fn load(&self) -> Result<Collection, StorageError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "collection file absent; starting empty");
                return Ok(Collection::new());
            }
            Err(source) => return Err(StorageError::Read { path: self.file_path.clone(), source }),
        };
        let collection: Collection = serde_json::from_slice(&bytes)
            .map_err(|source| StorageError::Corrupt { path: self.file_path.clone(), source })?;
        self.check_ids(&collection)?;
        Ok(collection)
    }

    async fn save(&self, collection: &Collection) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(collection).map_err(StorageError::Encode)?;
        let tmp = self.temp_path();
        if let Err(source) = self.write_atomically(&tmp, &bytes).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StorageError::Write { path: self.file_path.clone(), source });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}
