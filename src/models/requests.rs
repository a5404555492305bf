use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::MatchRequest;

/// Request to find matching providers
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    pub request: MatchRequest,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "topK", alias = "top_k", default)]
    pub top_k: Option<u16>,
    /// Only consider providers with expertise in the requested blockchain
    #[serde(rename = "ecosystemOnly", alias = "ecosystem_only", default)]
    pub ecosystem_only: bool,
}
