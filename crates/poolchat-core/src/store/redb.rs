//! Key-value backend storing the whole document as a JSON blob under a
//! fixed key in a redb table.

use crate::error::{ChatError, Result};
use crate::record::Document;
use crate::store::backend::DocumentBackend;
use async_trait::async_trait;
use redb::{Database, TableDefinition};
use std::path::Path;
use std::sync::Arc;

const SUBMISSIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("submissions");
const DOCUMENT_KEY: &str = "document";

pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Open or create the redb database at `path`, ensuring the table
    /// exists before any reads.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path).map_err(|e| ChatError::Backend(e.to_string()))?;
        let wt = db
            .begin_write()
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        wt.open_table(SUBMISSIONS)
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        wt.commit().map_err(|e| ChatError::Backend(e.to_string()))?;
        Ok(Self { db: Arc::new(db) })
    }

    fn read_sync(db: &Database) -> Result<Document> {
        let rt = db
            .begin_read()
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        let table = rt
            .open_table(SUBMISSIONS)
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        match table
            .get(DOCUMENT_KEY)
            .map_err(|e| ChatError::Backend(e.to_string()))?
        {
            Some(blob) => Ok(serde_json::from_slice(blob.value())?),
            None => Ok(Document::default()),
        }
    }

    fn write_sync(db: &Database, doc: &Document) -> Result<()> {
        let value = serde_json::to_vec(doc)?;
        let wt = db
            .begin_write()
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        {
            let mut table = wt
                .open_table(SUBMISSIONS)
                .map_err(|e| ChatError::Backend(e.to_string()))?;
            table
                .insert(DOCUMENT_KEY, value.as_slice())
                .map_err(|e| ChatError::Backend(e.to_string()))?;
        }
        wt.commit().map_err(|e| ChatError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for RedbBackend {
    async fn read(&self) -> Result<Document> {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || Self::read_sync(&db))
            .await
            .map_err(|e| ChatError::Backend(format!("task join error: {e}")))?
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        let db = Arc::clone(&self.db);
        let doc = doc.clone();
        tokio::task::spawn_blocking(move || Self::write_sync(&db, &doc))
            .await
            .map_err(|e| ChatError::Backend(format!("task join error: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, SubmissionRecord};
    use crate::types::{PoolSize, Schedule};
    use chrono::Utc;
    use tempfile::TempDir;

    fn quote_record(id: &str) -> SubmissionRecord {
        SubmissionRecord {
            id: id.into(),
            created_at: Utc::now(),
            payload: Payload::Quote {
                pool_size: PoolSize::Small,
                schedule: Schedule::Biweekly,
                monthly_price: 119,
                name: "Jane".into(),
                email: "jane@example.com".into(),
                phone: "4695550100".into(),
                address: "123 Elm St".into(),
            },
        }
    }

    #[tokio::test]
    async fn fresh_database_reads_empty() {
        let dir = TempDir::new().unwrap();
        let backend = RedbBackend::open(&dir.path().join("poolchat.redb")).unwrap();
        assert!(backend.read().await.unwrap().submissions.is_empty());
    }

    #[tokio::test]
    async fn write_replaces_the_blob() {
        let dir = TempDir::new().unwrap();
        let backend = RedbBackend::open(&dir.path().join("poolchat.redb")).unwrap();

        let mut doc = Document::default();
        doc.submissions.push(quote_record("q_1_aaa"));
        backend.write(&doc).await.unwrap();
        assert_eq!(backend.read().await.unwrap(), doc);

        doc.submissions.push(quote_record("q_2_bbb"));
        backend.write(&doc).await.unwrap();
        assert_eq!(backend.read().await.unwrap().submissions.len(), 2);
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("poolchat.redb");
        {
            let backend = RedbBackend::open(&path).unwrap();
            let doc = Document {
                submissions: vec![quote_record("q_1_aaa")],
            };
            backend.write(&doc).await.unwrap();
        }
        let backend = RedbBackend::open(&path).unwrap();
        assert_eq!(backend.read().await.unwrap().submissions.len(), 1);
    }
}
