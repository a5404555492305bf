// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Availability, BudgetRange, CandidateFilter, Complexity, DimensionScores, MatchCriteria,
    MatchRequest, MatchResult, ProjectType, ProviderProfile, ScoringWeights, Timeline,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, ProvidersResponse};
