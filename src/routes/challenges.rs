use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::challenges::{Challenge, ChallengeSummary, Difficulty},
    services::challenges,
};

#[derive(Debug, Deserialize)]
pub struct ChallengeFilter {
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateFixRequest {
    pub challenge_id: u32,
    pub user_fix: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateFixResponse {
    pub passed: bool,
    pub message: String,
}

/// Handler for listing challenges, optionally filtered by difficulty
/// and tag. Returns summaries only, never the buggy code or answer.
pub async fn list_challenges(
    Extension(request_id): Extension<RequestId>,
    Query(filter): Query<ChallengeFilter>,
) -> Json<Vec<ChallengeSummary>> {
    let matches = challenges::filtered(filter.difficulty, filter.tag.as_deref());

    tracing::info!(
        request_id = %request_id,
        matches = matches.len(),
        "Listing debugging challenges"
    );

    Json(matches.into_iter().map(ChallengeSummary::from).collect())
}

/// Handler for fetching a single challenge by id
pub async fn get_challenge(
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<u32>,
) -> AppResult<Json<Challenge>> {
    let challenge = challenges::find(id)
        .ok_or_else(|| AppError::NotFound(format!("Challenge {id} not found")))?;

    tracing::info!(
        request_id = %request_id,
        challenge_id = id,
        "Serving challenge"
    );

    Ok(Json(challenge.clone()))
}

/// Handler for checking a user's proposed fix against the known
/// correct line
pub async fn validate_fix(
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ValidateFixRequest>,
) -> AppResult<Json<ValidateFixResponse>> {
    let challenge = challenges::find(request.challenge_id).ok_or_else(|| {
        AppError::NotFound(format!("Challenge {} not found", request.challenge_id))
    })?;

    let passed = challenges::validate_fix(challenge, &request.user_fix);

    tracing::info!(
        request_id = %request_id,
        challenge_id = request.challenge_id,
        passed = passed,
        "Validated challenge fix"
    );

    let message = if passed {
        "All test cases passed!".to_string()
    } else {
        format!(
            "Your fix was not correct. Expected: {}",
            challenge.correct_line
        )
    };

    Ok(Json(ValidateFixResponse { passed, message }))
}
