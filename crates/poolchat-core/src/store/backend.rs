use crate::error::Result;
use crate::record::Document;
use async_trait::async_trait;

/// Storage for the shared submission document.
///
/// Backends persist the document as a unit; the store serializes every
/// read-modify-write cycle behind its own lock, so a backend only has to
/// make each `read` and `write` individually consistent. Callers never
/// learn which backend is active.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Read the current document. A backend with no document yet returns
    /// the empty document.
    async fn read(&self) -> Result<Document>;

    /// Replace the stored document.
    async fn write(&self, doc: &Document) -> Result<()>;
}
