//! Remote content-store backend: the document lives behind an HTTP
//! endpoint that returns an ETag on GET and accepts an `If-Match`
//! conditional PUT. The store's write lock already serializes local
//! writers; the conditional PUT catches writers outside this process.

use crate::error::{ChatError, Result};
use crate::record::Document;
use crate::store::backend::DocumentBackend;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION, ETAG, IF_MATCH};
use reqwest::StatusCode;
use std::time::Duration;
use tokio::sync::Mutex;

pub struct RemoteBackend {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    /// ETag of the last document this process read. Guarded by the
    /// store's write lock during read-modify-write cycles.
    etag: Mutex<Option<String>>,
}

impl RemoteBackend {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
            token,
            etag: Mutex::new(None),
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }
}

#[async_trait]
impl DocumentBackend for RemoteBackend {
    async fn read(&self) -> Result<Document> {
        let resp = self
            .auth(self.client.get(&self.url))
            .send()
            .await
            .map_err(|e| ChatError::Backend(e.to_string()))?;

        if resp.status() == StatusCode::NOT_FOUND {
            *self.etag.lock().await = None;
            return Ok(Document::default());
        }
        if !resp.status().is_success() {
            return Err(ChatError::Backend(format!(
                "remote read failed with {}",
                resp.status()
            )));
        }

        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        *self.etag.lock().await = etag;

        let doc = resp
            .json::<Document>()
            .await
            .map_err(|e| ChatError::Backend(e.to_string()))?;
        Ok(doc)
    }

    async fn write(&self, doc: &Document) -> Result<()> {
        let mut req = self.auth(self.client.put(&self.url)).json(doc);
        if let Some(etag) = self.etag.lock().await.as_deref() {
            if let Ok(value) = HeaderValue::from_str(etag) {
                req = req.header(IF_MATCH, value);
            }
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ChatError::WriteFailed(e.to_string()))?;

        match resp.status() {
            StatusCode::PRECONDITION_FAILED => Err(ChatError::WriteFailed(
                "remote document changed underneath us".to_string(),
            )),
            status if status.is_success() => {
                let etag = resp
                    .headers()
                    .get(ETAG)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *self.etag.lock().await = etag;
                Ok(())
            }
            status => Err(ChatError::WriteFailed(format!(
                "remote write failed with {status}"
            ))),
        }
    }
}
