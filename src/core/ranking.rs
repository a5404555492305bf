use std::cmp::Ordering;

use crate::models::{DimensionScores, ProviderProfile};

/// Number of results returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 5;

/// A provider with its computed scores, before ranking
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub profile: &'a ProviderProfile,
    pub scores: DimensionScores,
    pub composite: f64,
}

/// Total order used for ranking
///
/// Composite score descending, then rating descending, then completed
/// audits descending, then provider id ascending. Scores compare with
/// `total_cmp`, so ties are bit-for-bit ties.
pub fn compare_candidates(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.composite
        .total_cmp(&a.composite)
        .then_with(|| b.profile.average_rating.total_cmp(&a.profile.average_rating))
        .then_with(|| {
            b.profile
                .total_audits_completed
                .cmp(&a.profile.total_audits_completed)
        })
        .then_with(|| a.profile.id.cmp(&b.profile.id))
}

/// Sort the candidate set and keep the best `top_k`
///
/// An empty set stays empty; `top_k == 0` empties it.
pub fn rank_candidates(mut candidates: Vec<ScoredCandidate<'_>>, top_k: usize) -> Vec<ScoredCandidate<'_>> {
    candidates.sort_by(compare_candidates);
    candidates.truncate(top_k);
    candidates
}
