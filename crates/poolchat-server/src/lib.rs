pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use poolchat_core::store::SubmissionStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(store: Arc<SubmissionStore>) -> Router {
    let app_state = state::AppState::new(store);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/quotes", post(routes::quotes::submit_quote))
        .route("/api/inquiries", post(routes::inquiries::submit_inquiry))
        .route(
            "/api/submissions/{kind}",
            get(routes::submissions::list_submissions),
        )
        .layer(cors)
        .with_state(app_state)
}

/// Start the lead-capture API server.
pub async fn serve(store: Arc<SubmissionStore>, port: u16) -> anyhow::Result<()> {
    let app = build_router(store);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("poolchat API listening on http://localhost:{port}");

    axum::serve(listener, app).await?;
    Ok(())
}
