use rayon::prelude::*;

use crate::core::{
    cancel::{Cancellable, CancellationToken},
    error::MatchError,
    explain::explain_match,
    normalizer::normalize_request,
    ranking::{rank_candidates, ScoredCandidate, DEFAULT_TOP_K},
    scoring::{composite_score, score_dimensions},
};
use crate::models::{MatchCriteria, MatchRequest, MatchResult, ProviderProfile, ScoringWeights};

/// Pools at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Criteria normalization
/// 2. Per-provider dimension scoring and aggregation (parallel map)
/// 3. Ranking with deterministic tie-breaks
/// 4. Explanations for the top results
///
/// Holds no state between calls.
#[derive(Debug, Clone)]
pub struct Matcher {
    parallel_threshold: usize,
}

impl Matcher {
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Rank `providers` against `request` and return the best `top_k`
    ///
    /// # Arguments
    /// * `request` - Raw criteria, validated here
    /// * `providers` - Candidate pool supplied by the provider directory
    /// * `top_k` - Number of results, 5 when `None`
    ///
    /// # Returns
    /// At most `top_k` results, best first. An empty pool gives an empty list.
    pub fn find_matches(
        &self,
        request: &MatchRequest,
        providers: &[ProviderProfile],
        top_k: Option<usize>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        self.find_matches_with_cancel(request, providers, top_k, &CancellationToken::new())
    }

    /// Same as `find_matches`, checking `cancel` between provider evaluations
    pub fn find_matches_with_cancel<C: Cancellable>(
        &self,
        request: &MatchRequest,
        providers: &[ProviderProfile],
        top_k: Option<usize>,
        cancel: &C,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let criteria = normalize_request(request)?;
        self.match_criteria(&criteria, providers, top_k, cancel)
    }

    /// Rank `providers` against criteria that are already normalized
    pub fn match_criteria<C: Cancellable>(
        &self,
        criteria: &MatchCriteria,
        providers: &[ProviderProfile],
        top_k: Option<usize>,
        cancel: &C,
    ) -> Result<Vec<MatchResult>, MatchError> {
        let top_k = top_k.unwrap_or(DEFAULT_TOP_K);

        let candidates = self
            .score_pool(criteria, providers, cancel)
            .ok_or(MatchError::Cancelled)?;

        let ranked = rank_candidates(candidates, top_k);

        let results: Vec<MatchResult> = ranked
            .into_iter()
            .map(|candidate| MatchResult {
                provider_id: candidate.profile.id.clone(),
                composite_score: candidate.composite,
                dimension_scores: candidate.scores,
                reasons: explain_match(&candidate.scores, candidate.profile),
            })
            .collect();

        tracing::debug!(
            "Ranked {} providers, returning {} (top_k={})",
            providers.len(),
            results.len(),
            top_k
        );

        Ok(results)
    }

    /// Score every provider; `None` if cancelled part-way
    fn score_pool<'a, C: Cancellable>(
        &self,
        criteria: &MatchCriteria,
        providers: &'a [ProviderProfile],
        cancel: &C,
    ) -> Option<Vec<ScoredCandidate<'a>>> {
        let score_one = |profile: &'a ProviderProfile| -> Option<ScoredCandidate<'a>> {
            if cancel.is_cancelled() {
                return None;
            }
            let scores = score_dimensions(criteria, profile);
            Some(ScoredCandidate {
                profile,
                scores,
                composite: composite_score(&scores, &ScoringWeights::FIXED),
            })
        };

        if providers.len() >= self.parallel_threshold {
            providers.par_iter().map(score_one).collect()
        } else {
            providers.iter().map(score_one).collect()
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
