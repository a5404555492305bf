// Integration tests for Audit Match

use audit_match::core::{CancellationToken, MatchError, Matcher};
use audit_match::models::{Availability, BudgetRange, CandidateFilter, MatchRequest, ProviderProfile};
use audit_match::services::{ProviderDirectory, StaticDirectory};

fn create_test_provider(id: &str, chain: &str, rating: f64, audits: u32) -> ProviderProfile {
    ProviderProfile {
        id: id.to_string(),
        name: Some(format!("Provider {}", id)),
        blockchain_expertise: vec![chain.to_string()],
        specializations: vec!["DeFi".to_string()],
        years_experience: 4.0,
        availability: Availability::Available,
        max_concurrent_audits: 4,
        current_audit_count: 2,
        hourly_rate_min: 100.0,
        hourly_rate_max: 200.0,
        response_time: "2h".to_string(),
        average_rating: rating,
        total_audits_completed: audits,
    }
}

fn create_test_request() -> MatchRequest {
    MatchRequest {
        blockchain: Some("Ethereum".to_string()),
        project_type: Some("defi".to_string()),
        budget_range: BudgetRange { min: 5000.0, max: 50000.0 },
        timeline: "normal".to_string(),
        complexity: "medium".to_string(),
    }
}

fn providers_path() -> String {
    format!("{}/config/providers.toml", env!("CARGO_MANIFEST_DIR"))
}

#[tokio::test]
async fn test_integration_end_to_end_matching() {
    let directory = StaticDirectory::from_toml_path(providers_path()).unwrap();
    let candidates = directory
        .fetch_candidates(&CandidateFilter::default())
        .await
        .unwrap();
    assert!(!candidates.is_empty());

    let matcher = Matcher::with_defaults();
    let results = matcher
        .find_matches(&create_test_request(), &candidates, None)
        .unwrap();

    assert_eq!(results.len(), 5.min(candidates.len()));

    // All matches should be sorted by score
    for i in 1..results.len() {
        assert!(
            results[i - 1].composite_score >= results[i].composite_score,
            "Matches not sorted by score"
        );
    }

    // An Ethereum DeFi specialist should lead an Ethereum DeFi request
    assert_eq!(results[0].provider_id, "chainguard");
}

#[test]
fn test_empty_pool_returns_empty() {
    let matcher = Matcher::with_defaults();
    let results = matcher.find_matches(&create_test_request(), &[], Some(5)).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_result_length_is_min_of_top_k_and_pool() {
    let matcher = Matcher::with_defaults();
    let pool: Vec<ProviderProfile> = (0..7)
        .map(|i| create_test_provider(&format!("p{}", i), "Ethereum", 4.0, i))
        .collect();

    for top_k in 0..12 {
        let results = matcher
            .find_matches(&create_test_request(), &pool, Some(top_k))
            .unwrap();
        assert_eq!(results.len(), top_k.min(pool.len()));
    }
}

#[test]
fn test_equal_scores_ordered_by_rating() {
    let matcher = Matcher::with_defaults();
    let pool = vec![
        create_test_provider("lower", "Ethereum", 4.2, 50),
        create_test_provider("higher", "Ethereum", 4.6, 50),
    ];

    let results = matcher.find_matches(&create_test_request(), &pool, None).unwrap();

    assert_eq!(results[0].composite_score, results[1].composite_score);
    assert_eq!(results[0].provider_id, "higher");
    assert_eq!(results[1].provider_id, "lower");
}

#[test]
fn test_fully_tied_pool_is_ordered_by_id() {
    let matcher = Matcher::with_defaults();
    let pool = vec![
        create_test_provider("c", "Ethereum", 4.5, 10),
        create_test_provider("a", "Ethereum", 4.5, 10),
        create_test_provider("b", "Ethereum", 4.5, 10),
    ];

    let results = matcher.find_matches(&create_test_request(), &pool, None).unwrap();
    let ids: Vec<&str> = results.iter().map(|r| r.provider_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn test_determinism() {
    let matcher = Matcher::new(8);
    let pool: Vec<ProviderProfile> = (0..200)
        .map(|i| {
            create_test_provider(
                &format!("p{:03}", i),
                if i % 2 == 0 { "Ethereum" } else { "Solana" },
                4.0 + (i % 3) as f64 * 0.5,
                (i % 4) as u32,
            )
        })
        .collect();

    let first = matcher.find_matches(&create_test_request(), &pool, Some(50)).unwrap();
    let second = matcher.find_matches(&create_test_request(), &pool, Some(50)).unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    // Input order does not leak into the ranking
    let mut reversed = pool.clone();
    reversed.reverse();
    let third = matcher.find_matches(&create_test_request(), &reversed, Some(50)).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_cancelled_match() {
    let matcher = Matcher::new(1);
    let token = CancellationToken::new();
    token.cancel();

    let pool = vec![create_test_provider("a", "Ethereum", 4.5, 10)];
    let result = matcher.find_matches_with_cancel(&create_test_request(), &pool, None, &token);
    assert_eq!(result, Err(MatchError::Cancelled));
}

#[test]
fn test_match_result_wire_format() {
    let matcher = Matcher::with_defaults();
    let pool = vec![create_test_provider("a", "Ethereum", 4.9, 150)];
    let results = matcher.find_matches(&create_test_request(), &pool, None).unwrap();

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["providerId"], "a");
    assert!(json["compositeScore"].is_number());
    assert!(json["dimensionScores"]["expertise"].is_number());
    assert!(json["reasons"].is_array());
}

#[test]
fn test_static_directory_ecosystem_filter() {
    let directory = StaticDirectory::from_toml_path(providers_path()).unwrap();
    let filter = CandidateFilter {
        blockchain: Some("solana".to_string()),
    };

    let candidates = tokio_test::block_on(directory.fetch_candidates(&filter)).unwrap();

    assert!(!candidates.is_empty());
    assert!(candidates.iter().all(|p| p.has_expertise_in("Solana")));
}
