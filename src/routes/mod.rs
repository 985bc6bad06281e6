use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};
use crate::services::providers::CodeforcesProvider;

pub mod analyze;
pub mod challenges;
pub mod recommendations;
pub mod user;

/// Shared application state
pub struct AppState {
    pub provider: Arc<dyn CodeforcesProvider>,
    /// Problems returned per difficulty tier
    pub per_tier: usize,
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/codeforces/:handle", get(user::dashboard))
        .route("/recommendations", get(recommendations::recommend))
        .route(
            "/analyze-submission/:handle/:submission_id",
            get(analyze::analyze_submission),
        )
        .route("/challenges", get(challenges::list_challenges))
        .route("/challenge/:id", get(challenges::get_challenge))
        .route("/validate-fix", post(challenges::validate_fix))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
