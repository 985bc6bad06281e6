use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

pub mod challenges;
pub mod codeforces;

/// Rating assumed for users with no rated contests
pub const DEFAULT_RATING: i64 = 1500;

/// Identity of a Codeforces problem: contest id plus the short index
/// within the contest (e.g. contest 1700, index "A")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemId {
    pub contest_id: i64,
    pub index: String,
}

impl ProblemId {
    pub fn new(contest_id: i64, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }
}

impl Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.contest_id, self.index)
    }
}

/// A problem from the catalog. Owned by the catalog; the engines only
/// ever borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub contest_id: i64,
    pub index: String,
    pub name: String,
    /// Difficulty rating; `None` means the problem is unrated
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Problem {
    pub fn id(&self) -> ProblemId {
        ProblemId::new(self.contest_id, self.index.clone())
    }
}

/// Judge outcome for a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ok,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    #[serde(other)]
    Other,
}

impl Verdict {
    /// Maps a raw Codeforces verdict string. Unknown and missing
    /// verdicts (e.g. still testing) collapse into `Other`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("OK") => Verdict::Ok,
            Some("WRONG_ANSWER") => Verdict::WrongAnswer,
            Some("TIME_LIMIT_EXCEEDED") => Verdict::TimeLimitExceeded,
            Some("MEMORY_LIMIT_EXCEEDED") => Verdict::MemoryLimitExceeded,
            Some("RUNTIME_ERROR") => Verdict::RuntimeError,
            _ => Verdict::Other,
        }
    }
}

/// A user's submission for one problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub problem: ProblemId,
    pub verdict: Verdict,
    pub time_ms: u64,
    pub memory_bytes: u64,
    pub language: String,
    /// Unix timestamp of when the submission was made
    pub creation_time: i64,
}

/// One entry of a user's contest rating history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_update_time: i64,
}

/// Derived view of a user, built from rating history and submissions
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub handle: String,
    pub current_rating: i64,
    pub solved: HashSet<ProblemId>,
}

impl UserProfile {
    /// Builds a profile from a user's rating history and submission list.
    ///
    /// The current rating is the `new_rating` of the most recent rated
    /// contest, or [`DEFAULT_RATING`] for users without one. Solved
    /// problems are those with at least one OK verdict.
    pub fn build(
        handle: impl Into<String>,
        rating_history: &[RatingChange],
        submissions: &[Submission],
    ) -> Self {
        let current_rating = rating_history
            .last()
            .map(|change| change.new_rating)
            .unwrap_or(DEFAULT_RATING);

        let solved = submissions
            .iter()
            .filter(|s| s.verdict == Verdict::Ok)
            .map(|s| s.problem.clone())
            .collect();

        Self {
            handle: handle.into(),
            current_rating,
            solved,
        }
    }
}

/// Tiered problem recommendations, recomputed on every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub easy: Vec<Problem>,
    pub medium: Vec<Problem>,
    pub hard: Vec<Problem>,
    pub user_rating: i64,
}

/// Output of the performance analyzer. Percentiles are exact here;
/// the HTTP layer rounds for display.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub time_percentile: f64,
    pub memory_percentile: f64,
    pub submission_time: u64,
    pub average_time: f64,
    pub language: String,
    pub tips: Vec<String>,
}

/// Problem catalog as stored in the cache, stamped with its fetch time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub problems: Vec<Problem>,
}
