use std::sync::Arc;

use axum_test::TestServer;

use cf_companion::error::AppResult;
use cf_companion::models::{Problem, ProblemId, RatingChange, Submission, Verdict};
use cf_companion::routes::{create_router, AppState};
use cf_companion::services::providers::CodeforcesProvider;
use cf_companion::services::recommendation::DEFAULT_PER_TIER;

/// In-memory provider serving canned Codeforces data; no network, no Redis.
struct StubProvider {
    problems: Vec<Problem>,
    submissions: Vec<(String, Submission)>,
    rating_history: Vec<(String, RatingChange)>,
    contest_submissions: Vec<Submission>,
}

#[async_trait::async_trait]
impl CodeforcesProvider for StubProvider {
    async fn fetch_user_submissions(&self, handle: &str) -> AppResult<Vec<Submission>> {
        Ok(self
            .submissions
            .iter()
            .filter(|(h, _)| h == handle)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn fetch_rating_history(&self, handle: &str) -> AppResult<Vec<RatingChange>> {
        Ok(self
            .rating_history
            .iter()
            .filter(|(h, _)| h == handle)
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn fetch_problemset(&self) -> AppResult<Vec<Problem>> {
        Ok(self.problems.clone())
    }

    async fn fetch_contest_submissions(
        &self,
        contest_id: i64,
        count: u32,
    ) -> AppResult<Vec<Submission>> {
        Ok(self
            .contest_submissions
            .iter()
            .filter(|s| s.problem.contest_id == contest_id)
            .take(count as usize)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

fn problem(contest_id: i64, rating: i64, tags: &[&str]) -> Problem {
    Problem {
        contest_id,
        index: "A".to_string(),
        name: format!("Problem {}", contest_id),
        rating: Some(rating),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn submission(
    id: u64,
    problem: ProblemId,
    verdict: Verdict,
    time_ms: u64,
    language: &str,
) -> Submission {
    Submission {
        id,
        problem,
        verdict,
        time_ms,
        memory_bytes: 1_024_000,
        language: language.to_string(),
        creation_time: 1_700_000_000,
    }
}

fn fixture_state() -> Arc<AppState> {
    let solved_problem = ProblemId::new(3, "A");
    let target_problem = ProblemId::new(3, "A");

    // Alice: rating 1500, solved the 1450-rated problem, one submission to analyze
    let submissions = vec![
        (
            "alice".to_string(),
            submission(10, solved_problem, Verdict::Ok, 500, "GNU C++17"),
        ),
        (
            "bob".to_string(),
            submission(
                30,
                ProblemId::new(99, "A"),
                Verdict::WrongAnswer,
                200,
                "Python 3",
            ),
        ),
    ];

    let rating_history = vec![(
        "alice".to_string(),
        RatingChange {
            contest_id: 1,
            contest_name: "Round 1".to_string(),
            rank: 100,
            old_rating: 1400,
            new_rating: 1500,
            rating_update_time: 1_600_000_000,
        },
    )];

    // Reference population for problem 3A with the spec's 9-sample spread
    let contest_submissions = [100u64, 200, 300, 400, 600, 700, 800, 900, 1000]
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            submission(
                1000 + i as u64,
                target_problem.clone(),
                Verdict::Ok,
                t,
                "GNU C++17",
            )
        })
        .collect();

    let provider = StubProvider {
        problems: vec![
            problem(1, 1000, &["math"]),
            problem(2, 1100, &["dp"]),
            problem(3, 1450, &["greedy"]),
            problem(4, 1500, &["graphs"]),
            problem(5, 1550, &["math"]),
            problem(6, 1900, &["trees"]),
            problem(7, 1950, &["dp"]),
        ],
        submissions,
        rating_history,
        contest_submissions,
    };

    Arc::new(AppState {
        provider: Arc::new(provider),
        per_tier: DEFAULT_PER_TIER,
    })
}

fn create_test_server() -> TestServer {
    let app = create_router(fixture_state());
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommendations_tiers_and_exclusions() {
    let server = create_test_server();

    let response = server.get("/api/recommendations?handle=alice").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["user_rating"], 1500);

    // Easy window [1050, 1250]
    let easy = body["easy"].as_array().unwrap();
    assert_eq!(easy.len(), 1);
    assert_eq!(easy[0]["rating"], 1100);

    // Medium window [1450, 1580]; the solved 1450 problem is excluded
    let medium = body["medium"].as_array().unwrap();
    let ratings: Vec<i64> = medium.iter().map(|p| p["rating"].as_i64().unwrap()).collect();
    assert_eq!(ratings, vec![1500, 1550]);

    // Hard window [1750, 1950]
    let hard = body["hard"].as_array().unwrap();
    let ratings: Vec<i64> = hard.iter().map(|p| p["rating"].as_i64().unwrap()).collect();
    assert_eq!(ratings, vec![1900, 1950]);

    // Wire shape of a problem
    assert!(easy[0]["contestId"].is_i64());
    assert!(easy[0]["index"].is_string());
    assert!(easy[0]["tags"].is_array());
}

#[tokio::test]
async fn test_recommendations_requires_handle() {
    let server = create_test_server();
    let response = server.get("/api/recommendations").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_analyze_submission_percentiles() {
    let server = create_test_server();

    let response = server.get("/api/analyze-submission/alice/10").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    // 4 of 9 population samples are <= 500ms -> 44.4 after rounding
    assert_eq!(body["analysis"]["time_percentile"], 44.4);
    assert_eq!(body["analysis"]["submission_time"], 500);
    assert_eq!(body["analysis"]["language"], "GNU C++17");
    assert!(!body["tips"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_analyze_unknown_submission_returns_404() {
    let server = create_test_server();

    let response = server.get("/api/analyze-submission/alice/9999").await;
    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("9999"));
}

#[tokio::test]
async fn test_analyze_without_population_returns_422() {
    let server = create_test_server();

    // Bob's only submission failed and nothing else references contest 99
    let response = server.get("/api/analyze-submission/bob/30").await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_dashboard_payload() {
    let server = create_test_server();

    let response = server.get("/api/codeforces/alice").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["submissions"].as_array().unwrap().len(), 1);
    assert_eq!(body["rating_history"].as_array().unwrap().len(), 1);
    assert_eq!(body["rating_history"][0]["newRating"], 1500);
}

#[tokio::test]
async fn test_challenges_list_and_difficulty_filter() {
    let server = create_test_server();

    let response = server.get("/api/challenges").await;
    response.assert_status_ok();
    let all: serde_json::Value = response.json();
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 10);
    // Summaries never expose the code or the answer
    assert!(all[0].get("buggy_code").is_none());
    assert!(all[0].get("correct_line").is_none());

    let response = server.get("/api/challenges?difficulty=medium").await;
    response.assert_status_ok();
    let medium: serde_json::Value = response.json();
    let medium = medium.as_array().unwrap();
    assert!(!medium.is_empty());
    assert!(medium.iter().all(|c| c["difficulty"] == "medium"));
    assert!(medium.len() < all.len());
}

#[tokio::test]
async fn test_challenges_tag_filter() {
    let server = create_test_server();

    let response = server.get("/api/challenges?tag=strings").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let challenges = body.as_array().unwrap();
    assert!(!challenges.is_empty());
    assert!(challenges
        .iter()
        .all(|c| c["tags"].as_array().unwrap().iter().any(|t| t == "strings")));
}

#[tokio::test]
async fn test_challenge_detail_and_unknown_id() {
    let server = create_test_server();

    let response = server.get("/api/challenge/1").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Binary Search Edge Case");
    assert!(body["buggy_code"].as_str().unwrap().contains("// FIXME"));
    assert!(!body["test_cases"].as_array().unwrap().is_empty());

    let response = server.get("/api/challenge/9999").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_validate_fix_accepts_and_rejects() {
    let server = create_test_server();

    // Correct line with extra whitespace still passes
    let response = server
        .post("/api/validate-fix")
        .json(&serde_json::json!({
            "challenge_id": 1,
            "user_fix": "  return  -1 ;"
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["passed"], true);
    assert_eq!(body["message"], "All test cases passed!");

    let response = server
        .post("/api/validate-fix")
        .json(&serde_json::json!({
            "challenge_id": 1,
            "user_fix": "return 0;"
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["passed"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Expected: return -1;"));
}

#[tokio::test]
async fn test_validate_fix_unknown_challenge_returns_404() {
    let server = create_test_server();

    let response = server
        .post("/api/validate-fix")
        .json(&serde_json::json!({
            "challenge_id": 9999,
            "user_fix": "return -1;"
        }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = create_test_server();

    let response = server.get("/health").await;
    assert!(response.maybe_header("x-request-id").is_some());
}
