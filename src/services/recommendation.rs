//! Problem recommendation engine
//!
//! Selects unseen problems in three difficulty tiers relative to the user's
//! current rating, diversifying each tier by topic tag. Pure and
//! deterministic: the same profile and catalog snapshot always produce the
//! same recommendations.

use std::collections::HashSet;

use crate::models::{Problem, RecommendationSet, UserProfile};

/// Number of problems per tier unless the caller overrides it
pub const DEFAULT_PER_TIER: usize = 5;

/// Inclusive rating windows as offsets from the user's current rating
const EASY_WINDOW: (i64, i64) = (-450, -250);
const MEDIUM_WINDOW: (i64, i64) = (-50, 80);
const HARD_WINDOW: (i64, i64) = (250, 450);

/// Recommends up to `per_tier` problems in each difficulty tier.
///
/// Unrated problems and problems the user has already solved are never
/// eligible. A tier with fewer candidates than `per_tier` returns all of
/// them; there is no padding or cross-tier borrowing. An empty catalog
/// yields empty tiers, which is not an error.
pub fn recommend(profile: &UserProfile, catalog: &[Problem], per_tier: usize) -> RecommendationSet {
    let eligible: Vec<&Problem> = catalog
        .iter()
        .filter(|p| p.rating.is_some() && !profile.solved.contains(&p.id()))
        .collect();

    RecommendationSet {
        easy: select_tier(&eligible, profile.current_rating, EASY_WINDOW, per_tier),
        medium: select_tier(&eligible, profile.current_rating, MEDIUM_WINDOW, per_tier),
        hard: select_tier(&eligible, profile.current_rating, HARD_WINDOW, per_tier),
        user_rating: profile.current_rating,
    }
}

/// Greedy tag-diverse selection within one rating window.
///
/// Candidates are kept sorted by (rating asc, contest id asc, index asc);
/// each round picks the candidate covering the most tags not yet present
/// in the tier, with ties falling to the first candidate in sort order.
/// This keeps a tier from filling up with five problems that share one tag.
fn select_tier<'a>(
    eligible: &[&'a Problem],
    user_rating: i64,
    (lo, hi): (i64, i64),
    per_tier: usize,
) -> Vec<Problem> {
    let mut pool: Vec<&'a Problem> = eligible
        .iter()
        .copied()
        .filter(|p| {
            // Eligibility filtering already guarantees a rating is present
            let rating = p.rating.unwrap_or_default();
            rating >= user_rating + lo && rating <= user_rating + hi
        })
        .collect();
    pool.sort_by(|a, b| a.rating.cmp(&b.rating).then_with(|| a.id().cmp(&b.id())));

    let mut covered: HashSet<&'a str> = HashSet::new();
    let mut selected = Vec::new();

    while selected.len() < per_tier && !pool.is_empty() {
        let mut best = 0;
        let mut best_score = uncovered_tags(pool[0], &covered);
        for (i, candidate) in pool.iter().enumerate().skip(1) {
            let score = uncovered_tags(candidate, &covered);
            // Strict comparison keeps the earliest (lowest-rated) candidate on ties
            if score > best_score {
                best = i;
                best_score = score;
            }
        }

        let picked = pool.remove(best);
        covered.extend(picked.tags.iter().map(String::as_str));
        selected.push(picked.clone());
    }

    selected
}

fn uncovered_tags(problem: &Problem, covered: &HashSet<&str>) -> usize {
    problem
        .tags
        .iter()
        .filter(|tag| !covered.contains(tag.as_str()))
        .count()
}
