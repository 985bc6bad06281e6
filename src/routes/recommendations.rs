use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationSet, UserProfile},
    routes::AppState,
    services::recommendation,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub handle: String,
}

/// Handler for the recommendations endpoint
///
/// Resolves the user's profile and a catalog snapshot, then runs the pure
/// recommendation engine over them.
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationSet>> {
    let (submissions, history, catalog) = tokio::try_join!(
        state.provider.fetch_user_submissions(&query.handle),
        state.provider.fetch_rating_history(&query.handle),
        state.provider.fetch_problemset(),
    )?;

    let profile = UserProfile::build(&query.handle, &history, &submissions);

    tracing::info!(
        request_id = %request_id,
        handle = %profile.handle,
        rating = profile.current_rating,
        solved = profile.solved.len(),
        catalog_size = catalog.len(),
        "Computing recommendations"
    );

    let set = recommendation::recommend(&profile, &catalog, state.per_tier);

    Ok(Json(set))
}
