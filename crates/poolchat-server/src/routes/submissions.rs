use axum::extract::{Path, State};
use axum::Json;
use poolchat_core::types::RecordKind;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/submissions/:kind — stored records of one kind, newest
/// first. Read-only; used by admin tooling.
pub async fn list_submissions(
    State(app): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let records = app.store.list_by_kind(kind).await?;
    Ok(Json(serde_json::json!({
        "kind": kind,
        "count": records.len(),
        "submissions": records,
    })))
}
