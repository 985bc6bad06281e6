//! Submission performance analyzer
//!
//! Ranks one submission's time and memory against a reference population
//! of accepted submissions for the same problem and derives improvement
//! tips. Pure function of its inputs; the caller decides how the
//! population is scoped (per-problem across users, or per-user history).

use crate::error::{AppError, AppResult};
use crate::models::{AnalysisResult, Submission, Verdict};

/// Percentile above which a metric is considered a weak spot
const WEAK_SPOT_PERCENTILE: f64 = 70.0;

/// Time percentile above which managed-runtime I/O advice kicks in
const MANAGED_IO_PERCENTILE: f64 = 50.0;

/// Language name fragments indicating an interpreted or managed runtime
const MANAGED_RUNTIMES: &[&str] = &[
    "python", "pypy", "java", "kotlin", "c#", "mono", "javascript", "node", "ruby", "scala",
];

/// Analyzes `target` against a population of accepted submissions.
///
/// The target's verdict need not be OK; a failing submission can still be
/// ranked on the metrics it recorded before failing. The population must
/// be non-empty, otherwise there is nothing to rank against and the
/// analyzer fails with [`AppError::InsufficientData`].
pub fn analyze(target: &Submission, population: &[Submission]) -> AppResult<AnalysisResult> {
    if population.is_empty() {
        return Err(AppError::InsufficientData(format!(
            "no accepted submissions to compare against for problem {}",
            target.problem
        )));
    }

    let time_percentile = percentile_rank(target.time_ms, population.iter().map(|s| s.time_ms));
    let memory_percentile =
        percentile_rank(target.memory_bytes, population.iter().map(|s| s.memory_bytes));

    let total_time: u64 = population.iter().map(|s| s.time_ms).sum();
    let average_time = total_time as f64 / population.len() as f64;

    let tips = build_tips(target, time_percentile, memory_percentile);

    Ok(AnalysisResult {
        time_percentile,
        memory_percentile,
        submission_time: target.time_ms,
        average_time,
        language: target.language.clone(),
        tips,
    })
}

/// Share of samples with a value at or below `value`, expressed 0-100.
///
/// A target larger than every sample ranks 100; one strictly smaller than
/// every sample ranks 0. The caller guarantees a non-empty sample set.
fn percentile_rank<I>(value: u64, samples: I) -> f64
where
    I: IntoIterator<Item = u64>,
{
    let mut total = 0usize;
    let mut at_or_below = 0usize;
    for sample in samples {
        total += 1;
        if sample <= value {
            at_or_below += 1;
        }
    }

    at_or_below as f64 / total as f64 * 100.0
}

/// Fixed-order, independent tip rules; each appends at most one tip.
fn build_tips(target: &Submission, time_percentile: f64, memory_percentile: f64) -> Vec<String> {
    let mut tips = Vec::new();

    if time_percentile > WEAK_SPOT_PERCENTILE {
        tips.push(
            "Your runtime is slower than most accepted solutions. Revisit the algorithmic \
             complexity: a lower-order approach or tighter inner loop usually pays off here."
                .to_string(),
        );
    }

    if memory_percentile > WEAK_SPOT_PERCENTILE {
        tips.push(
            "Memory usage is on the high side. Try cutting allocations and using more compact \
             containers (e.g. flat arrays over nested maps)."
                .to_string(),
        );
    }

    if target.verdict != Verdict::Ok {
        tips.push(
            "The submission did not pass. Restate the edge cases (empty input, extremes, \
             duplicates) and stress-test against a brute-force solution."
                .to_string(),
        );
    }

    if is_managed_runtime(&target.language) && time_percentile > MANAGED_IO_PERCENTILE {
        tips.push(format!(
            "{} spends a lot of time in default I/O on large inputs; switch to a buffered \
             or batched I/O pattern.",
            target.language
        ));
    }

    if tips.is_empty() {
        tips.push(
            "Solid performance. Your submission holds up well against the reference set."
                .to_string(),
        );
    }

    tips
}

fn is_managed_runtime(language: &str) -> bool {
    let language = language.to_lowercase();
    MANAGED_RUNTIMES
        .iter()
        .any(|runtime| language.contains(runtime))
}
