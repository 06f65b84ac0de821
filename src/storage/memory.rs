use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DataSource, StorageResult};
use crate::store::Snapshot;

/// Process-local source; contents are lost on restart
#[derive(Default)]
pub struct MemorySource {
    snapshot: RwLock<Snapshot>,
}

#[async_trait]
impl DataSource for MemorySource {
    async fn load(&self) -> StorageResult<Snapshot> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        *self.snapshot.write().await = snapshot.clone();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory:".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let source = MemorySource::default();
        assert_eq!(source.load().await.unwrap(), Snapshot::default());

        let snapshot = Snapshot {
            root_employee: Some("boss".to_string()),
            ..Snapshot::default()
        };
        source.save(&snapshot).await.unwrap();
        assert_eq!(source.load().await.unwrap(), snapshot);
    }
}
