//! Bulk loading and clearing of a collection from a JSON seed document.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use crate::errors::ServiceError;
use crate::resource::ResourceStore;

pub const UNKNOWN_COMMAND: &str = "Unknown command. Use --insert or --delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedCommand {
    Insert,
    Delete,
}

impl SeedCommand {
    /// Exactly one of `--insert` or `--delete`; anything else is `None`.
    pub fn parse<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        match args.as_slice() {
            [only] => match only.as_ref() {
                "--insert" => Some(SeedCommand::Insert),
                "--delete" => Some(SeedCommand::Delete),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("seed file {} is not valid JSON: {source}", path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("seed file {} must hold an array of objects (entry {index} is not an object)", path.display())]
    Shape { path: PathBuf, index: usize },
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// What a seed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    Deleted(usize),
}

impl SeedOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SeedOutcome::Inserted(_) => "Movies inserted successfully.",
            SeedOutcome::Deleted(_) => "All movies deleted successfully.",
        }
    }
}

/// Read a seed document: a JSON array of objects.
pub async fn load_seed_file(path: &Path) -> Result<Vec<Map<String, Value>>, SeedError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| SeedError::Read { path: path.to_path_buf(), source })?;
    let items: Vec<Value> =
        serde_json::from_slice(&bytes).map_err(|source| SeedError::Parse { path: path.to_path_buf(), source })?;
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(SeedError::Shape { path: path.to_path_buf(), index }),
        })
        .collect()
}

/// Run `command` against `store`, reading records from `seed_file` on insert.
pub async fn run(command: SeedCommand, store: &ResourceStore, seed_file: &Path) -> Result<SeedOutcome, SeedError> {
    match command {
        SeedCommand::Insert => {
            let inputs = load_seed_file(seed_file).await?;
            let created = store.insert_many(inputs).await?;
            info!(resource = store.name(), inserted = created.len(), seed_file = %seed_file.display(), "seed_inserted");
            Ok(SeedOutcome::Inserted(created.len()))
        }
        SeedCommand::Delete => {
            let removed = store.delete_all().await?;
            info!(resource = store.name(), removed, "seed_deleted");
            Ok(SeedOutcome::Deleted(removed))
        }
    }
}
