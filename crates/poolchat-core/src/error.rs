use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("store unavailable: could not acquire the write lock in time")]
    StoreUnavailable,

    #[error("failed to persist submission: {0}")]
    WriteFailed(String),

    #[error("submission timed out")]
    Timeout,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("invalid service type: {0}")]
    InvalidServiceType(String),

    #[error("invalid pool size: {0}")]
    InvalidPoolSize(String),

    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("invalid step: {0}")]
    InvalidStep(String),

    #[error("invalid record kind: {0}")]
    InvalidKind(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ChatError {
    /// Construct a field-level validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
