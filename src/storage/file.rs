use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{DataSource, StorageResult};
use crate::store::Snapshot;

/// Snapshot kept as a pretty-printed JSON file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn load(&self) -> StorageResult<Snapshot> {
        if !fs::try_exists(&self.path).await? {
            tracing::warn!("{} does not exist yet, starting empty", self.path.display());
            return Ok(Snapshot::default());
        }

        let content = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&content)?)
    }

    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        // replace atomically
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(snapshot)?).await?;
        fs::rename(&tmp_path, &self.path).await?;

        tracing::info!("Saved chart to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
