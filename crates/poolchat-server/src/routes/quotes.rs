use axum::extract::State;
use axum::Json;
use poolchat_core::engine::ContactDetails;
use poolchat_core::pricing;
use poolchat_core::record::Payload;
use poolchat_core::types::{PoolSize, Schedule};
use poolchat_core::validate;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct QuoteBody {
    pub pool_size: PoolSize,
    pub schedule: Schedule,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// POST /api/quotes — persist a completed quote conversation.
///
/// The monthly price is derived from the schedule and pool size here;
/// a client-supplied figure is never trusted.
pub async fn submit_quote(
    State(app): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let details = ContactDetails {
        name: body.name,
        email: body.email,
        phone: body.phone,
        address: body.address,
    };
    validate::contact_details(&details)?;

    let monthly_price = pricing::monthly_price(body.schedule, body.pool_size);
    let payload = Payload::Quote {
        pool_size: body.pool_size,
        schedule: body.schedule,
        monthly_price,
        name: details.name,
        email: details.email,
        phone: details.phone,
        address: details.address,
    };

    let id = app.store.submit(payload).await?;
    Ok(Json(serde_json::json!({
        "quote_id": id,
        "monthly_price": monthly_price,
    })))
}
