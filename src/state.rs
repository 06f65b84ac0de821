use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::AppResult;
use crate::storage::DataSource;
use crate::store::RecordStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Chart records; every request rebuilds its view from these
    pub store: Arc<RwLock<RecordStore>>,
    /// Where the chart is loaded from and saved to
    pub source: Arc<dyn DataSource>,
    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: RecordStore, source: Arc<dyn DataSource>, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            source,
            config: Arc::new(config),
        }
    }

    /// Load the chart from the data source, replacing the in-memory records.
    ///
    /// A snapshot with duplicate ids leaves the records as they were.
    pub async fn reload(&self) -> AppResult<()> {
        let snapshot = self.source.load().await?;
        self.store.write().await.replace(snapshot)?;
        Ok(())
    }

    /// Write the in-memory records to the data source
    pub async fn persist(&self) -> Result<(), crate::storage::StorageError> {
        let snapshot = self.store.read().await.snapshot();
        self.source.save(&snapshot).await
    }
}
