//! Data-source abstraction for Codeforces
//!
//! Routes depend on this trait rather than on a concrete HTTP client, so
//! the data source can be swapped (or stubbed in tests) without touching
//! the engines. The engines themselves never fetch: callers resolve a
//! snapshot through a provider and pass it in by argument.

use crate::error::AppResult;
use crate::models::{Problem, RatingChange, Submission};

pub mod codeforces;

/// Trait for Codeforces data providers
///
/// All methods return domain types; raw wire payloads are mapped at the
/// provider boundary. Implementations own their caching policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CodeforcesProvider: Send + Sync {
    /// Fetch a user's submission history, most recent first
    async fn fetch_user_submissions(&self, handle: &str) -> AppResult<Vec<Submission>>;

    /// Fetch a user's contest rating history, oldest first
    async fn fetch_rating_history(&self, handle: &str) -> AppResult<Vec<RatingChange>>;

    /// Fetch the full problem catalog
    async fn fetch_problemset(&self) -> AppResult<Vec<Problem>>;

    /// Fetch up to `count` recent submissions of one contest
    async fn fetch_contest_submissions(
        &self,
        contest_id: i64,
        count: u32,
    ) -> AppResult<Vec<Submission>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
