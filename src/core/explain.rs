use crate::models::{DimensionScores, ProviderProfile};

pub const REASON_EXPERTISE: &str = "Strong expertise match";
pub const REASON_AVAILABILITY: &str = "High availability";
pub const REASON_BUDGET: &str = "Budget compatible";
pub const REASON_TOP_RATED: &str = "Top-rated provider";
pub const REASON_EXPERIENCED: &str = "Highly experienced";

const EXPERTISE_THRESHOLD: f64 = 0.7;
const AVAILABILITY_THRESHOLD: f64 = 0.8;
const BUDGET_THRESHOLD: f64 = 0.9;
const TOP_RATING: f64 = 4.8;
const EXPERIENCED_AUDIT_COUNT: u32 = 100;

/// Build the "why matched" reasons for one ranked provider
///
/// Rules are evaluated in a fixed order and each reason appears at most
/// once. An empty list is a valid outcome.
pub fn explain_match(scores: &DimensionScores, profile: &ProviderProfile) -> Vec<String> {
    let rules = [
        (scores.expertise > EXPERTISE_THRESHOLD, REASON_EXPERTISE),
        (scores.availability >= AVAILABILITY_THRESHOLD, REASON_AVAILABILITY),
        (scores.budget > BUDGET_THRESHOLD, REASON_BUDGET),
        (profile.average_rating >= TOP_RATING, REASON_TOP_RATED),
        (
            profile.total_audits_completed > EXPERIENCED_AUDIT_COUNT,
            REASON_EXPERIENCED,
        ),
    ];

    let mut reasons: Vec<String> = Vec::with_capacity(rules.len());
    for (applies, reason) in rules {
        if applies && !reasons.iter().any(|r| r == reason) {
            reasons.push(reason.to_string());
        }
    }
    reasons
}
