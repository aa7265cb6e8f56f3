use std::path::PathBuf;

use models::{RecordId, ValidationError};
use thiserror::Error;

/// Failure of the persistence port: the medium could not be read or written,
/// or what it holds is not a valid collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("corrupt collection in {}: {source}", path.display())]
    Corrupt { path: PathBuf, source: serde_json::Error },
    #[error("invalid collection in {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
    #[error("cannot encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StorageError),
    #[error("no identifiers left in {0}")]
    IdsExhausted(&'static str),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &RecordId) -> Self {
        Self::NotFound(format!("{entity} with id {id} not found"))
    }

    /// Message suitable for the client-facing envelope.
    pub fn client_message(&self) -> String {
        match self {
            ServiceError::Validation(e) => e.to_string(),
            ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::StorageUnavailable(_) => "storage unavailable".to_string(),
            ServiceError::IdsExhausted(_) => "no identifiers left".to_string(),
        }
    }
}
