use crate::error::Result;
use crate::record::Document;
use crate::store::backend::DocumentBackend;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process backend. Useful for tests and embedders that don't need
/// durability.
#[derive(Default)]
pub struct MemoryBackend {
    doc: RwLock<Document>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(doc: Document) -> Self {
        Self {
            doc: RwLock::new(doc),
        }
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    async fn read(&self) -> Result<Document> {
        Ok(self.doc.read().await.clone())
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        *self.doc.write().await = doc.clone();
        Ok(())
    }
}
