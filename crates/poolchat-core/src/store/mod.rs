//! The submission store: durably appends completed quote and inquiry
//! records to a shared document under an exclusive write lock, then
//! notifies the outbound channel best-effort.
//!
//! The document backend is chosen at startup by configuration; callers
//! never learn whether records live in a local JSON file, a redb
//! database, or a remote content store.

pub mod backend;
pub mod file;
pub mod memory;
pub mod redb;
pub mod remote;

use crate::config::{Config, StorageConfig};
use crate::error::{ChatError, Result};
use crate::notify::Notifier;
use crate::record::{Payload, SubmissionRecord};
use crate::types::RecordKind;
use backend::DocumentBackend;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

const DEFAULT_LOCK_WAIT: Duration = Duration::from_secs(5);
const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(20);

pub struct SubmissionStore {
    backend: Box<dyn DocumentBackend>,
    notifier: Option<Arc<Notifier>>,
    /// Exclusive lock over the whole document. Every read-modify-write
    /// cycle runs under it; concurrent submits serialize here.
    write_lock: Mutex<()>,
    lock_wait: Duration,
    submit_timeout: Duration,
}

impl SubmissionStore {
    pub fn new(backend: Box<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            notifier: None,
            write_lock: Mutex::new(()),
            lock_wait: DEFAULT_LOCK_WAIT,
            submit_timeout: DEFAULT_SUBMIT_TIMEOUT,
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn with_timeouts(mut self, lock_wait: Duration, submit_timeout: Duration) -> Self {
        self.lock_wait = lock_wait;
        self.submit_timeout = submit_timeout;
        self
    }

    /// Build a store from configuration: backend, notifier, timeouts.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Box<dyn DocumentBackend> = match &config.storage {
            StorageConfig::File { path } => Box::new(file::JsonFileBackend::new(path)),
            StorageConfig::Redb { path } => Box::new(redb::RedbBackend::open(path)?),
            StorageConfig::Remote { url, token } => {
                Box::new(remote::RemoteBackend::new(url, token.clone())?)
            }
        };

        let mut store = Self::new(backend).with_timeouts(
            Duration::from_millis(config.timeouts.lock_wait_ms),
            Duration::from_secs(config.timeouts.submit_timeout_secs),
        );
        if let Some(notifier) = &config.notifier {
            store = store.with_notifier(Notifier::new(&notifier.endpoint)?);
        }
        Ok(store)
    }

    /// Append a new submission and return its generated id.
    ///
    /// The id and `created_at` are generated here, never supplied by the
    /// caller. The payload must already have passed field validation.
    /// The whole call is bounded by the submit timeout; the lock wait is
    /// bounded separately and surfaces as `StoreUnavailable`.
    pub async fn submit(&self, payload: Payload) -> Result<String> {
        match tokio::time::timeout(self.submit_timeout, self.submit_locked(payload)).await {
            Ok(result) => result,
            Err(_) => Err(ChatError::Timeout),
        }
    }

    async fn submit_locked(&self, payload: Payload) -> Result<String> {
        let guard = tokio::time::timeout(self.lock_wait, self.write_lock.lock())
            .await
            .map_err(|_| ChatError::StoreUnavailable)?;

        let record = SubmissionRecord {
            id: generate_id(payload.kind()),
            created_at: Utc::now(),
            payload,
        };

        // Read-modify-write under the lock; the guard drops on every
        // path, including errors.
        let mut doc = self
            .backend
            .read()
            .await
            .map_err(|e| ChatError::WriteFailed(e.to_string()))?;
        doc.submissions.push(record.clone());
        self.backend.write(&doc).await.map_err(|e| match e {
            ChatError::WriteFailed(_) => e,
            other => ChatError::WriteFailed(other.to_string()),
        })?;
        drop(guard);

        tracing::info!(id = %record.id, kind = %record.kind(), "submission stored");

        // Best-effort notification, decoupled from the write path. A
        // failure is logged and never reaches the caller.
        if let Some(notifier) = self.notifier.clone() {
            let notified = record.clone();
            tokio::spawn(async move {
                if let Err(e) = notifier.send(&notified).await {
                    tracing::warn!(id = %notified.id, error = %e, "notification failed");
                }
            });
        }

        Ok(record.id)
    }

    /// All records of one kind, newest first.
    ///
    /// Reads without the write lock: records are immutable once appended,
    /// so the worst case is a slightly stale listing, never a corrupt one.
    pub async fn list_by_kind(&self, kind: RecordKind) -> Result<Vec<SubmissionRecord>> {
        let doc = self.backend.read().await?;
        let mut records: Vec<SubmissionRecord> = doc
            .submissions
            .into_iter()
            .filter(|r| r.kind() == kind)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

/// Opaque submission id: kind prefix, millisecond timestamp, random
/// suffix. Sorts roughly by creation time and is unique enough for a
/// document-sized store.
fn generate_id(kind: RecordKind) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect();
    format!("{}_{}_{}", kind.id_prefix(), Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Document;
    use crate::types::{PoolSize, Schedule, ServiceType};
    use async_trait::async_trait;
    use super::memory::MemoryBackend;

    fn quote_payload() -> Payload {
        Payload::Quote {
            pool_size: PoolSize::Medium,
            schedule: Schedule::Weekly,
            monthly_price: 180,
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: "4695550100".into(),
            address: "123 Elm St".into(),
        }
    }

    fn inquiry_payload() -> Payload {
        Payload::Inquiry {
            service_type: ServiceType::Question,
            name: "Sam Lee".into(),
            phone: "4695550111".into(),
            email: "sam@example.com".into(),
            message: "Do you service spas?".into(),
        }
    }

    /// Backend whose writes stall, for exercising the bounded lock wait
    /// and the submit timeout.
    struct SlowBackend {
        delay: Duration,
        inner: MemoryBackend,
    }

    #[async_trait]
    impl backend::DocumentBackend for SlowBackend {
        async fn read(&self) -> Result<Document> {
            self.inner.read().await
        }

        async fn write(&self, doc: &Document) -> Result<()> {
            tokio::time::sleep(self.delay).await;
            self.inner.write(doc).await
        }
    }

    /// Backend that rejects every write.
    struct BrokenBackend;

    #[async_trait]
    impl backend::DocumentBackend for BrokenBackend {
        async fn read(&self) -> Result<Document> {
            Ok(Document::default())
        }

        async fn write(&self, _doc: &Document) -> Result<()> {
            Err(ChatError::Backend("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn submit_generates_id_and_timestamp() {
        let store = SubmissionStore::new(Box::new(MemoryBackend::new()));
        let id = store.submit(quote_payload()).await.unwrap();
        assert!(id.starts_with("q_"));

        let records = store.list_by_kind(RecordKind::Quote).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
    }

    #[tokio::test]
    async fn inquiry_ids_use_their_own_prefix() {
        let store = SubmissionStore::new(Box::new(MemoryBackend::new()));
        let id = store.submit(inquiry_payload()).await.unwrap();
        assert!(id.starts_with("i_"));
    }

    #[tokio::test]
    async fn list_by_kind_filters_and_sorts_newest_first() {
        let store = SubmissionStore::new(Box::new(MemoryBackend::new()));
        let first = store.submit(quote_payload()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        store.submit(inquiry_payload()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let last = store.submit(quote_payload()).await.unwrap();

        let quotes = store.list_by_kind(RecordKind::Quote).await.unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].id, last);
        assert_eq!(quotes[1].id, first);

        let inquiries = store.list_by_kind(RecordKind::Inquiry).await.unwrap();
        assert_eq!(inquiries.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_submits_never_lose_updates() {
        // P5: N concurrent submits against an empty document leave
        // exactly N records with N distinct ids.
        let store = Arc::new(SubmissionStore::new(Box::new(MemoryBackend::new())));
        let n = 16;

        let mut handles = Vec::new();
        for _ in 0..n {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(
                async move { store.submit(quote_payload()).await },
            ));
        }

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            let id = handle.await.unwrap().unwrap();
            assert!(ids.insert(id), "duplicate id");
        }

        let records = store.list_by_kind(RecordKind::Quote).await.unwrap();
        assert_eq!(records.len(), n);
    }

    #[tokio::test]
    async fn bounded_lock_wait_surfaces_store_unavailable() {
        let store = Arc::new(
            SubmissionStore::new(Box::new(SlowBackend {
                delay: Duration::from_millis(300),
                inner: MemoryBackend::new(),
            }))
            .with_timeouts(Duration::from_millis(50), Duration::from_secs(20)),
        );

        let holder = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.submit(quote_payload()).await })
        };
        // Let the first submit take the lock and stall in its write.
        tokio::time::sleep(Duration::from_millis(50)).await;

        let err = store.submit(quote_payload()).await.unwrap_err();
        assert!(matches!(err, ChatError::StoreUnavailable));
        holder.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn slow_backend_surfaces_timeout() {
        let store = SubmissionStore::new(Box::new(SlowBackend {
            delay: Duration::from_millis(500),
            inner: MemoryBackend::new(),
        }))
        .with_timeouts(Duration::from_secs(5), Duration::from_millis(50));

        let err = store.submit(quote_payload()).await.unwrap_err();
        assert!(matches!(err, ChatError::Timeout));
    }

    #[tokio::test]
    async fn broken_backend_surfaces_write_failed() {
        let store = SubmissionStore::new(Box::new(BrokenBackend));
        let err = store.submit(quote_payload()).await.unwrap_err();
        assert!(matches!(err, ChatError::WriteFailed(_)));
    }

    #[tokio::test]
    async fn failed_submit_leaves_no_partial_record() {
        let store = SubmissionStore::new(Box::new(BrokenBackend));
        let _ = store.submit(quote_payload()).await;
        assert!(store
            .list_by_kind(RecordKind::Quote)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn notifier_failure_does_not_fail_submit() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/f/broken")
            .with_status(500)
            .create_async()
            .await;

        let store = SubmissionStore::new(Box::new(MemoryBackend::new()))
            .with_notifier(Notifier::new(format!("{}/f/broken", server.url())).unwrap());

        let id = store.submit(quote_payload()).await.unwrap();
        assert!(id.starts_with("q_"));
        assert_eq!(store.list_by_kind(RecordKind::Quote).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn generated_ids_are_distinct() {
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            assert!(ids.insert(generate_id(RecordKind::Quote)));
        }
    }
}
