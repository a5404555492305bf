use crate::models::{
    Availability, DimensionScores, MatchCriteria, ProviderProfile, ScoringWeights, Timeline,
};

/// Baseline audit size in hours used to turn an hourly rate into a cost estimate
pub const STANDARD_AUDIT_HOURS: f64 = 40.0;

/// Providers answering within this many hours count as fast for `asap` requests
pub const RESPONSE_FAST_THRESHOLD_HOURS: f64 = 2.0;

/// Flat availability score for providers marked busy
pub const BUSY_AVAILABILITY_SCORE: f64 = 0.2;

const BLOCKCHAIN_MATCH_WEIGHT: f64 = 0.4;
const SPECIALIZATION_WEIGHT: f64 = 0.3;
const EXPERIENCE_CAP: f64 = 0.3;

/// Compute all four dimension scores for one (criteria, provider) pair
///
/// The scorers are independent of each other and of every other provider.
pub fn score_dimensions(criteria: &MatchCriteria, profile: &ProviderProfile) -> DimensionScores {
    DimensionScores {
        expertise: expertise_score(criteria, profile),
        availability: availability_score(profile),
        budget: budget_score(criteria, profile),
        timeline: timeline_score(criteria, profile),
    }
}

/// Weighted combination of the dimension scores
///
/// composite = (
///     expertise * 0.40 +
///     availability * 0.25 +
///     budget * 0.20 +
///     timeline * 0.15
/// )
#[inline]
pub fn composite_score(scores: &DimensionScores, weights: &ScoringWeights) -> f64 {
    scores.expertise * weights.expertise
        + scores.availability * weights.availability
        + scores.budget * weights.budget
        + scores.timeline * weights.timeline
}

/// Expertise score (0-1)
/// Ecosystem match, specialization overlap with the project category,
/// and capped years of experience
pub fn expertise_score(criteria: &MatchCriteria, profile: &ProviderProfile) -> f64 {
    let blockchain_match = match &criteria.blockchain {
        Some(chain) if profile.has_expertise_in(chain) => 1.0,
        _ => 0.0,
    };

    let overlap_ratio = match criteria.project_type {
        Some(project_type) => {
            let tags = project_type.reference_tags();
            let matched = tags
                .iter()
                .filter(|tag| profile.has_specialization(tag))
                .count();
            matched as f64 / tags.len() as f64
        }
        None => 0.0,
    };

    let experience = (profile.years_experience / 10.0).min(EXPERIENCE_CAP);

    clamp_unit(
        BLOCKCHAIN_MATCH_WEIGHT * blockchain_match
            + SPECIALIZATION_WEIGHT * overlap_ratio
            + experience,
    )
}

/// Availability score (0-1)
/// Free capacity share for available providers, flat 0.2 when busy
pub fn availability_score(profile: &ProviderProfile) -> f64 {
    match profile.availability {
        Availability::Busy => BUSY_AVAILABILITY_SCORE,
        Availability::Available => {
            if profile.max_concurrent_audits == 0 {
                return 0.0;
            }
            let free = profile
                .max_concurrent_audits
                .saturating_sub(profile.current_audit_count);
            clamp_unit(free as f64 / profile.max_concurrent_audits as f64)
        }
    }
}

/// Budget score (0-1)
/// 1.0 when the estimated audit cost fits the budget ceiling, otherwise
/// the fraction of the cost the ceiling covers
pub fn budget_score(criteria: &MatchCriteria, profile: &ProviderProfile) -> f64 {
    let estimated_cost = profile.average_hourly_rate() * STANDARD_AUDIT_HOURS;
    let ceiling = criteria.budget_range.max;

    if estimated_cost <= ceiling || estimated_cost <= 0.0 {
        return 1.0;
    }

    clamp_unit(ceiling / estimated_cost)
}

/// Timeline score (0-1)
/// Only `asap` requests look at the provider's response time
pub fn timeline_score(criteria: &MatchCriteria, profile: &ProviderProfile) -> f64 {
    match criteria.timeline {
        Timeline::Asap => {
            if is_fast_responder(&profile.response_time) {
                1.0
            } else {
                0.7
            }
        }
        Timeline::Normal => 0.9,
        Timeline::Flexible => 1.0,
    }
}

/// Whether a response-time token is within the fast threshold
pub fn is_fast_responder(token: &str) -> bool {
    parse_response_hours(token)
        .map(|hours| hours <= RESPONSE_FAST_THRESHOLD_HOURS)
        .unwrap_or(false)
}

/// Parse tokens like `30m`, `2h`, `1d` (optionally `< 2h`) into hours
pub fn parse_response_hours(token: &str) -> Option<f64> {
    let token = token.trim().trim_start_matches('<').trim();
    let split = token.find(|c: char| c.is_ascii_alphabetic())?;
    let (amount, unit) = token.split_at(split);
    let amount: f64 = amount.trim().parse().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    let hours = match unit.trim().to_ascii_lowercase().as_str() {
        "m" | "min" | "mins" | "minutes" => amount / 60.0,
        "h" | "hr" | "hrs" | "hour" | "hours" => amount,
        "d" | "day" | "days" => amount * 24.0,
        _ => return None,
    };
    Some(hours)
}

/// Clamp to [0, 1], mapping NaN to 0
#[inline]
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetRange, Complexity, ProjectType};

    fn create_test_profile() -> ProviderProfile {
        ProviderProfile {
            id: "auditor-1".to_string(),
            name: None,
            blockchain_expertise: vec!["Ethereum".to_string()],
            specializations: vec!["DeFi".to_string(), "Smart Contracts".to_string()],
            years_experience: 10.0,
            availability: Availability::Available,
            max_concurrent_audits: 5,
            current_audit_count: 1,
            hourly_rate_min: 100.0,
            hourly_rate_max: 150.0,
            response_time: "2h".to_string(),
            average_rating: 4.9,
            total_audits_completed: 120,
        }
    }

    fn create_test_criteria() -> MatchCriteria {
        MatchCriteria {
            blockchain: Some("Ethereum".to_string()),
            project_type: Some(ProjectType::Defi),
            budget_range: BudgetRange { min: 5000.0, max: 50000.0 },
            timeline: Timeline::Normal,
            complexity: Complexity::Medium,
        }
    }

    #[test]
    fn test_reference_example() {
        let scores = score_dimensions(&create_test_criteria(), &create_test_profile());

        assert_eq!(scores.expertise, 1.0);
        assert_eq!(scores.availability, 0.8);
        assert_eq!(scores.budget, 1.0);
        assert_eq!(scores.timeline, 0.9);

        let composite = composite_score(&scores, &ScoringWeights::FIXED);
        assert!((composite - 0.935).abs() < 1e-9);
    }

    #[test]
    fn test_expertise_partial_overlap() {
        let mut profile = create_test_profile();
        profile.specializations = vec!["defi".to_string()];
        profile.years_experience = 1.0;

        let score = expertise_score(&create_test_criteria(), &profile);
        // 0.4 + 0.3 * 0.5 + 0.1
        assert!((score - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_expertise_without_preferences() {
        let mut criteria = create_test_criteria();
        criteria.blockchain = None;
        criteria.project_type = None;
        let mut profile = create_test_profile();
        profile.years_experience = 2.0;

        let score = expertise_score(&criteria, &profile);
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_expertise_duplicate_tags_stay_bounded() {
        let mut profile = create_test_profile();
        profile.specializations = vec![
            "DeFi".to_string(),
            "defi".to_string(),
            "Smart Contracts".to_string(),
            "Smart Contracts".to_string(),
        ];
        let score = expertise_score(&create_test_criteria(), &profile);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_availability_score() {
        let mut profile = create_test_profile();
        assert_eq!(availability_score(&profile), 0.8);

        profile.availability = Availability::Busy;
        assert_eq!(availability_score(&profile), BUSY_AVAILABILITY_SCORE);
    }

    #[test]
    fn test_availability_zero_capacity() {
        let mut profile = create_test_profile();
        profile.max_concurrent_audits = 0;
        profile.current_audit_count = 0;
        assert_eq!(availability_score(&profile), 0.0);
    }

    #[test]
    fn test_availability_overbooked_is_zero() {
        let mut profile = create_test_profile();
        profile.current_audit_count = 7;
        assert_eq!(availability_score(&profile), 0.0);
    }

    #[test]
    fn test_budget_over_ceiling() {
        let mut criteria = create_test_criteria();
        criteria.budget_range.max = 2500.0;

        // estimated cost 125 * 40 = 5000
        let score = budget_score(&criteria, &create_test_profile());
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_budget_zero_ceiling() {
        let mut criteria = create_test_criteria();
        criteria.budget_range = BudgetRange { min: 0.0, max: 0.0 };
        assert_eq!(budget_score(&criteria, &create_test_profile()), 0.0);
    }

    #[test]
    fn test_timeline_score() {
        let mut criteria = create_test_criteria();
        let mut profile = create_test_profile();

        criteria.timeline = Timeline::Asap;
        assert_eq!(timeline_score(&criteria, &profile), 1.0);

        profile.response_time = "24h".to_string();
        assert_eq!(timeline_score(&criteria, &profile), 0.7);

        criteria.timeline = Timeline::Normal;
        assert_eq!(timeline_score(&criteria, &profile), 0.9);

        criteria.timeline = Timeline::Flexible;
        assert_eq!(timeline_score(&criteria, &profile), 1.0);
    }

    #[test]
    fn test_parse_response_hours() {
        assert_eq!(parse_response_hours("1h"), Some(1.0));
        assert_eq!(parse_response_hours("30m"), Some(0.5));
        assert_eq!(parse_response_hours("< 2h"), Some(2.0));
        assert_eq!(parse_response_hours("1d"), Some(24.0));
        assert_eq!(parse_response_hours("soon"), None);
        assert_eq!(parse_response_hours(""), None);
    }

    #[test]
    fn test_fast_responder() {
        assert!(is_fast_responder("1h"));
        assert!(is_fast_responder("2h"));
        assert!(is_fast_responder("45m"));
        assert!(!is_fast_responder("4h"));
        assert!(!is_fast_responder("unknown"));
    }

    #[test]
    fn test_composite_monotonic_in_each_dimension() {
        let base = DimensionScores {
            expertise: 0.5,
            availability: 0.5,
            budget: 0.5,
            timeline: 0.5,
        };
        let weights = ScoringWeights::FIXED;
        let base_score = composite_score(&base, &weights);

        let bumps = [
            DimensionScores { expertise: 0.6, ..base },
            DimensionScores { availability: 0.6, ..base },
            DimensionScores { budget: 0.6, ..base },
            DimensionScores { timeline: 0.6, ..base },
        ];
        for bumped in bumps {
            assert!(composite_score(&bumped, &weights) >= base_score);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((ScoringWeights::FIXED.sum() - 1.0).abs() < 1e-12);
    }
}
