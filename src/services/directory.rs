use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::models::{CandidateFilter, ProviderProfile};

/// Errors that can occur when fetching providers from a directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Directory returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Invalid provider profile: {0}")]
    InvalidProfile(String),

    #[error("Failed to read provider file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse provider file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Source of candidate providers for a match call
///
/// The matcher never owns provider storage; it only scores the pool a
/// directory hands back.
#[async_trait]
pub trait ProviderDirectory: Send + Sync {
    /// Fetch every provider admitted by `filter`
    async fn fetch_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProviderProfile>, DirectoryError>;

    /// Short label for logs
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct ProvidersFile {
    #[serde(default)]
    providers: Vec<ProviderProfile>,
}

/// In-memory directory, optionally loaded from a TOML file of `[[providers]]`
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    providers: Vec<ProviderProfile>,
}

impl StaticDirectory {
    /// Build a directory, rejecting inconsistent or duplicate profiles
    pub fn new(providers: Vec<ProviderProfile>) -> Result<Self, DirectoryError> {
        let mut seen = std::collections::HashSet::new();
        for profile in &providers {
            profile
                .check_consistency()
                .map_err(DirectoryError::InvalidProfile)?;
            if !seen.insert(profile.id.as_str()) {
                return Err(DirectoryError::InvalidProfile(format!(
                    "duplicate provider id {}",
                    profile.id
                )));
            }
        }
        Ok(Self { providers })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, DirectoryError> {
        let file: ProvidersFile = toml::from_str(contents)?;
        Self::new(file.providers)
    }

    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self, DirectoryError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let directory = Self::from_toml_str(&contents)?;
        tracing::info!(
            "Loaded {} providers from {}",
            directory.len(),
            path.as_ref().display()
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[async_trait]
impl ProviderDirectory for StaticDirectory {
    async fn fetch_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProviderProfile>, DirectoryError> {
        let candidates: Vec<ProviderProfile> = self
            .providers
            .iter()
            .filter(|profile| filter.admits(profile))
            .cloned()
            .collect();

        tracing::debug!(
            "Static directory returned {} of {} providers ({})",
            candidates.len(),
            self.providers.len(),
            filter
        );

        Ok(candidates)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
