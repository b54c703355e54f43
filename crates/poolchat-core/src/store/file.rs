use crate::error::{ChatError, Result};
use crate::io;
use crate::record::Document;
use crate::store::backend::DocumentBackend;
use async_trait::async_trait;
use std::path::PathBuf;

/// JSON document on the local filesystem, replaced atomically on write.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentBackend for JsonFileBackend {
    async fn read(&self) -> Result<Document> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        let data = serde_json::to_vec_pretty(doc)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || io::atomic_write(&path, &data))
            .await
            .map_err(|e| ChatError::Backend(format!("task join error: {e}")))?
    }
}
