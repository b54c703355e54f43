use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use poolchat_core::ChatError;

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ChatError>() {
            Some(ChatError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(ChatError::StoreUnavailable) => StatusCode::SERVICE_UNAVAILABLE,
            Some(ChatError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            Some(ChatError::WriteFailed(_)) => StatusCode::BAD_GATEWAY,
            Some(
                ChatError::InvalidServiceType(_)
                | ChatError::InvalidPoolSize(_)
                | ChatError::InvalidSchedule(_)
                | ChatError::InvalidStep(_)
                | ChatError::InvalidKind(_),
            ) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
