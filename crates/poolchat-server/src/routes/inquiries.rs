use axum::extract::State;
use axum::Json;
use poolchat_core::engine::InquiryDetails;
use poolchat_core::record::Payload;
use poolchat_core::types::ServiceType;
use poolchat_core::validate;
use poolchat_core::ChatError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct InquiryBody {
    pub service_type: ServiceType,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
}

/// POST /api/inquiries — persist a repair/question inquiry.
pub async fn submit_inquiry(
    State(app): State<AppState>,
    Json(body): Json<InquiryBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Inquiries only exist on the repair/question branch.
    if body.service_type == ServiceType::Cleaning {
        return Err(ChatError::InvalidServiceType("cleaning".into()).into());
    }

    let inquiry = InquiryDetails {
        name: body.name,
        phone: body.phone,
        email: body.email,
        message: body.message,
    };
    validate::inquiry_details(&inquiry)?;

    let payload = Payload::Inquiry {
        service_type: body.service_type,
        name: inquiry.name,
        phone: inquiry.phone,
        email: inquiry.email,
        message: inquiry.message,
    };

    let id = app.store.submit(payload).await?;
    Ok(Json(serde_json::json!({ "inquiry_id": id })))
}
