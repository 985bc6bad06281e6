use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{AnalysisResult, Submission, Verdict},
    routes::AppState,
    services::analysis,
};

/// How many recent contest submissions to sample as the reference population
const POPULATION_SAMPLE: u32 = 100;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisBody,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisBody {
    pub time_percentile: f64,
    pub memory_percentile: f64,
    pub submission_time: u64,
    pub average_time: f64,
    pub language: String,
}

impl From<AnalysisResult> for AnalyzeResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            analysis: AnalysisBody {
                time_percentile: round1(result.time_percentile),
                memory_percentile: round1(result.memory_percentile),
                submission_time: result.submission_time,
                average_time: round1(result.average_time),
                language: result.language,
            },
            tips: result.tips,
        }
    }
}

/// One decimal place for display; the core keeps exact values
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Handler for the submission analysis endpoint
///
/// Scopes the reference population to recent accepted submissions for the
/// same problem across all users, falling back to the user's own accepted
/// submissions when the contest sample has none.
pub async fn analyze_submission(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((handle, submission_id)): Path<(String, u64)>,
) -> AppResult<Json<AnalyzeResponse>> {
    let submissions = state.provider.fetch_user_submissions(&handle).await?;

    let target = submissions
        .iter()
        .find(|s| s.id == submission_id)
        .cloned()
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "submission {} not found for handle {}",
                submission_id, handle
            ))
        })?;

    let contest_sample = state
        .provider
        .fetch_contest_submissions(target.problem.contest_id, POPULATION_SAMPLE)
        .await?;

    let mut population: Vec<Submission> = contest_sample
        .into_iter()
        .filter(|s| s.problem == target.problem && s.verdict == Verdict::Ok)
        .collect();

    if population.is_empty() {
        population = submissions
            .iter()
            .filter(|s| s.problem == target.problem && s.verdict == Verdict::Ok)
            .cloned()
            .collect();
    }

    tracing::info!(
        request_id = %request_id,
        handle = %handle,
        submission_id = submission_id,
        problem = %target.problem,
        population = population.len(),
        "Analyzing submission"
    );

    let result = analysis::analyze(&target, &population)?;

    Ok(Json(AnalyzeResponse::from(result)))
}
