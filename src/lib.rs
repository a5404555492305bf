//! Audit Match - provider matching and ranking for the audit marketplace
//!
//! This library scores a pool of audit providers against a request's
//! criteria, ranks them deterministically, and explains the top results.
//! The engine in `core` is pure and synchronous; `services` and `routes`
//! wrap it in a provider directory and an HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{CancellationToken, MatchError, Matcher};
pub use models::{DimensionScores, MatchRequest, MatchResult, ProviderProfile, ScoringWeights};
pub use services::{ProviderDirectory, StaticDirectory};
