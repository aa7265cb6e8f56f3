//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the data directory exists; warn when an optional seed file is missing.
pub async fn ensure_env(data_dir: &Path, seed_file: Option<&Path>) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", data_dir.display()))?;
    info!(data_dir = %data_dir.display(), "data directory ready");

    if let Some(seed) = seed_file {
        if tokio::fs::metadata(seed).await.is_err() {
            warn!(seed_file = %seed.display(), "seed file not found; `seed --insert` will fail");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("hub_env_{}", uuid::Uuid::new_v4())).join("nested");
        ensure_env(&dir, None).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(dir.parent().unwrap()).await;
        Ok(())
    }
}
