//! Raw Codeforces API payload types
//!
//! The Codeforces API wraps every result in a `{status, comment, result}`
//! envelope and uses camelCase field names. These types mirror that wire
//! format; conversions into the domain types of [`crate::models`] happen
//! here so nothing loosely typed leaks past this boundary.

use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Problem, ProblemId, Submission, Verdict};

/// Response envelope common to all Codeforces API methods
#[derive(Debug, Clone, Deserialize)]
pub struct CfEnvelope<T> {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    /// No `default` attribute here: it would demand `T: Default` from the
    /// derived impl, and serde already maps a missing `Option` field to `None`
    pub result: Option<T>,
}

/// Problem as returned by `problemset.problems` and embedded in submissions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfProblem {
    /// Absent for problems outside regular contests (e.g. acmsguru archive)
    #[serde(default)]
    pub contest_id: Option<i64>,
    pub index: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Result payload of `problemset.problems`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfProblemsetResult {
    pub problems: Vec<CfProblem>,
}

/// Submission as returned by `user.status` and `contest.status`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfSubmission {
    pub id: u64,
    pub problem: CfProblem,
    /// Absent while the submission is still being judged
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub time_consumed_millis: u64,
    #[serde(default)]
    pub memory_consumed_bytes: u64,
    pub programming_language: String,
    pub creation_time_seconds: i64,
}

/// Rating change as returned by `user.rating`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfRatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_update_time_seconds: i64,
}

impl TryFrom<CfProblem> for Problem {
    type Error = AppError;

    fn try_from(raw: CfProblem) -> Result<Self, Self::Error> {
        let contest_id = raw.contest_id.ok_or_else(|| {
            AppError::UnknownProblem(format!(
                "problem '{}' ({}) has no contest id",
                raw.name, raw.index
            ))
        })?;

        Ok(Problem {
            contest_id,
            index: raw.index,
            name: raw.name,
            rating: raw.rating,
            tags: raw.tags,
        })
    }
}

impl TryFrom<CfSubmission> for Submission {
    type Error = AppError;

    fn try_from(raw: CfSubmission) -> Result<Self, Self::Error> {
        let contest_id = raw.problem.contest_id.ok_or_else(|| {
            AppError::UnknownProblem(format!(
                "submission {} references problem '{}' without a contest id",
                raw.id, raw.problem.name
            ))
        })?;

        Ok(Submission {
            id: raw.id,
            problem: ProblemId::new(contest_id, raw.problem.index),
            verdict: Verdict::parse(raw.verdict.as_deref()),
            time_ms: raw.time_consumed_millis,
            memory_bytes: raw.memory_consumed_bytes,
            language: raw.programming_language,
            creation_time: raw.creation_time_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_problem(contest_id: Option<i64>) -> CfProblem {
        CfProblem {
            contest_id,
            index: "B".to_string(),
            name: "Spreadsheets".to_string(),
            rating: Some(1600),
            tags: vec!["implementation".to_string(), "math".to_string()],
        }
    }

    #[test]
    fn test_problem_conversion() {
        let problem = Problem::try_from(raw_problem(Some(1))).unwrap();
        assert_eq!(problem.id(), ProblemId::new(1, "B"));
        assert_eq!(problem.rating, Some(1600));
        assert_eq!(problem.tags.len(), 2);
    }

    #[test]
    fn test_problem_without_contest_id_is_unknown() {
        let err = Problem::try_from(raw_problem(None)).unwrap_err();
        assert!(matches!(err, AppError::UnknownProblem(_)));
    }

    #[test]
    fn test_submission_conversion() {
        let raw = CfSubmission {
            id: 42,
            problem: raw_problem(Some(1)),
            verdict: Some("OK".to_string()),
            time_consumed_millis: 233,
            memory_consumed_bytes: 4_096_000,
            programming_language: "Python 3".to_string(),
            creation_time_seconds: 1_700_000_000,
        };

        let submission = Submission::try_from(raw).unwrap();
        assert_eq!(submission.id, 42);
        assert_eq!(submission.problem, ProblemId::new(1, "B"));
        assert_eq!(submission.verdict, Verdict::Ok);
        assert_eq!(submission.time_ms, 233);
        assert_eq!(submission.language, "Python 3");
    }

    #[test]
    fn test_submission_without_contest_id_is_unknown() {
        let raw = CfSubmission {
            id: 42,
            problem: raw_problem(None),
            verdict: Some("OK".to_string()),
            time_consumed_millis: 233,
            memory_consumed_bytes: 4_096_000,
            programming_language: "Python 3".to_string(),
            creation_time_seconds: 1_700_000_000,
        };

        let err = Submission::try_from(raw).unwrap_err();
        assert!(matches!(err, AppError::UnknownProblem(_)));
    }

    #[test]
    fn test_envelope_with_failed_status() {
        let json = r#"{"status":"FAILED","comment":"handle: User not found"}"#;
        let envelope: CfEnvelope<Vec<CfSubmission>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "FAILED");
        assert!(envelope.result.is_none());
        assert_eq!(envelope.comment.unwrap(), "handle: User not found");
    }

    #[test]
    fn test_envelope_missing_result_without_default_payload() {
        // CfProblemsetResult has no Default impl, so this only compiles
        // if the derived Deserialize does not require T: Default
        let json = r#"{"status":"FAILED","comment":"problemset unavailable"}"#;
        let envelope: CfEnvelope<CfProblemsetResult> = serde_json::from_str(json).unwrap();
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_envelope_parses_wire_payload() {
        let json = r#"{
            "status": "OK",
            "result": [{
                "id": 1,
                "problem": {"contestId": 4, "index": "A", "name": "Watermelon", "rating": 800, "tags": ["math"]},
                "verdict": "OK",
                "timeConsumedMillis": 154,
                "memoryConsumedBytes": 102400,
                "programmingLanguage": "GNU C++17",
                "creationTimeSeconds": 1600000000
            }]
        }"#;
        let envelope: CfEnvelope<Vec<CfSubmission>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, "OK");
        let raw = &envelope.result.unwrap()[0];
        assert_eq!(raw.problem.contest_id, Some(4));
        assert_eq!(raw.time_consumed_millis, 154);
    }
}
