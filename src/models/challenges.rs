//! Debugging-challenge entities
//!
//! Challenges are small buggy C++ snippets with one line to fix. The
//! catalog is static and ships with the binary; unlike the Codeforces
//! data there is no external source to fetch or cache.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One expected input/output pair for a challenge
#[derive(Debug, Clone, Serialize)]
pub struct TestCase {
    pub input: serde_json::Value,
    pub output: serde_json::Value,
}

/// A debugging challenge: a snippet with a single `// FIXME` line the
/// user must replace
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub problem: String,
    pub buggy_code: String,
    pub test_cases: Vec<TestCase>,
    pub correct_line: String,
}

/// Listing view of a challenge, without the code or test cases
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeSummary {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
}

impl From<&Challenge> for ChallengeSummary {
    fn from(challenge: &Challenge) -> Self {
        Self {
            id: challenge.id,
            title: challenge.title.clone(),
            difficulty: challenge.difficulty,
            tags: challenge.tags.clone(),
        }
    }
}
