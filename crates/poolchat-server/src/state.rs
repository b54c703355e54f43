use poolchat_core::store::SubmissionStore;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SubmissionStore>,
}

impl AppState {
    pub fn new(store: Arc<SubmissionStore>) -> Self {
        Self { store }
    }
}
