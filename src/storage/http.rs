use async_trait::async_trait;

use super::{DataSource, StorageError, StorageResult};
use crate::store::Snapshot;

/// Static chart JSON served over HTTP; read-only
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn load(&self) -> StorageResult<Snapshot> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, _snapshot: &Snapshot) -> StorageResult<()> {
        Err(StorageError::ReadOnly(self.describe()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
