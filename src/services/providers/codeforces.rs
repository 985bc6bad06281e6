//! Codeforces API client
//!
//! Implements [`CodeforcesProvider`] over the public REST API with a
//! Redis read-through cache in front of every method. The API refuses
//! requests without browser-like headers, hence the User-Agent below.

use chrono::Utc;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        codeforces::{CfEnvelope, CfProblem, CfProblemsetResult, CfRatingChange, CfSubmission},
        CatalogSnapshot, Problem, RatingChange, Submission,
    },
    services::providers::CodeforcesProvider,
};

const USER_DATA_TTL: u64 = 300; // 5 minutes
const PROBLEMSET_TTL: u64 = 3600; // 1 hour

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Clone)]
pub struct CodeforcesClient {
    http_client: HttpClient,
    api_url: String,
    cache: Cache,
}

impl CodeforcesClient {
    pub fn new(cache: Cache, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            cache,
        }
    }

    /// Calls one API method and unwraps the `{status, comment, result}` envelope
    async fn call_api<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.api_url, method);

        tracing::debug!(method = %method, "Fetching from Codeforces API");

        let response = self
            .http_client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .header("Referer", "https://codeforces.com/")
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                method = %method,
                status = %status,
                body = %body,
                "Codeforces API request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Codeforces API returned status {}: {}",
                status, body
            )));
        }

        let envelope: CfEnvelope<T> = response.json().await?;

        if envelope.status != "OK" {
            let comment = envelope
                .comment
                .unwrap_or_else(|| "no comment provided".to_string());
            tracing::warn!(method = %method, comment = %comment, "Codeforces API rejected call");
            return Err(AppError::ExternalApi(format!(
                "Codeforces API call {} failed: {}",
                method, comment
            )));
        }

        envelope.result.ok_or_else(|| {
            AppError::ExternalApi(format!("Codeforces API call {} returned no result", method))
        })
    }
}

/// Maps raw submissions into the domain, skipping entries whose problem
/// has no resolvable identity (archive problems without a contest id).
fn convert_submissions(raw: Vec<CfSubmission>) -> Vec<Submission> {
    raw.into_iter()
        .filter_map(|s| match Submission::try_from(s) {
            Ok(submission) => Some(submission),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping submission at boundary");
                None
            }
        })
        .collect()
}

fn convert_problems(raw: Vec<CfProblem>) -> Vec<Problem> {
    raw.into_iter()
        .filter_map(|p| match Problem::try_from(p) {
            Ok(problem) => Some(problem),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping catalog problem at boundary");
                None
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl CodeforcesProvider for CodeforcesClient {
    async fn fetch_user_submissions(&self, handle: &str) -> AppResult<Vec<Submission>> {
        let key = CacheKey::UserStatus(handle.to_string());
        cached!(self.cache, key, USER_DATA_TTL, async {
            let raw: Vec<CfSubmission> = self
                .call_api("user.status", &[("handle", handle.to_string())])
                .await?;
            Ok::<_, AppError>(convert_submissions(raw))
        })
    }

    async fn fetch_rating_history(&self, handle: &str) -> AppResult<Vec<RatingChange>> {
        let key = CacheKey::RatingHistory(handle.to_string());
        cached!(self.cache, key, USER_DATA_TTL, async {
            let raw: Vec<CfRatingChange> = self
                .call_api("user.rating", &[("handle", handle.to_string())])
                .await?;
            let history = raw
                .into_iter()
                .map(|change| RatingChange {
                    contest_id: change.contest_id,
                    contest_name: change.contest_name,
                    rank: change.rank,
                    old_rating: change.old_rating,
                    new_rating: change.new_rating,
                    rating_update_time: change.rating_update_time_seconds,
                })
                .collect::<Vec<_>>();
            Ok::<_, AppError>(history)
        })
    }

    async fn fetch_problemset(&self) -> AppResult<Vec<Problem>> {
        let key = CacheKey::Problemset;
        let snapshot: AppResult<CatalogSnapshot> =
            cached!(self.cache, key, PROBLEMSET_TTL, async {
                let result: CfProblemsetResult = self.call_api("problemset.problems", &[]).await?;
                let problems = convert_problems(result.problems);
                tracing::info!(count = problems.len(), "Fetched problem catalog");
                Ok::<_, AppError>(CatalogSnapshot {
                    fetched_at: Utc::now(),
                    problems,
                })
            });
        Ok(snapshot?.problems)
    }

    async fn fetch_contest_submissions(
        &self,
        contest_id: i64,
        count: u32,
    ) -> AppResult<Vec<Submission>> {
        let key = CacheKey::ContestStatus(contest_id);
        cached!(self.cache, key, USER_DATA_TTL, async {
            let raw: Vec<CfSubmission> = self
                .call_api(
                    "contest.status",
                    &[
                        ("contestId", contest_id.to_string()),
                        ("from", "1".to_string()),
                        ("count", count.to_string()),
                    ],
                )
                .await?;
            Ok::<_, AppError>(convert_submissions(raw))
        })
    }

    fn name(&self) -> &'static str {
        "codeforces"
    }
}
