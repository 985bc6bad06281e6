use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RatingChange, Submission},
    routes::AppState,
};

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub submissions: Vec<Submission>,
    pub rating_history: Vec<RatingChange>,
}

/// Handler for the dashboard endpoint: a user's raw submission history
/// and contest rating history in one payload.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(handle): Path<String>,
) -> AppResult<Json<DashboardResponse>> {
    let (submissions, rating_history) = tokio::try_join!(
        state.provider.fetch_user_submissions(&handle),
        state.provider.fetch_rating_history(&handle),
    )?;

    tracing::info!(
        request_id = %request_id,
        handle = %handle,
        submissions = submissions.len(),
        contests = rating_history.len(),
        "Serving dashboard data"
    );

    Ok(Json(DashboardResponse {
        submissions,
        rating_history,
    }))
}
