use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

use crate::models::{CandidateFilter, ProviderProfile};
use crate::services::directory::{DirectoryError, ProviderDirectory};

/// HTTP client for an external provider directory
///
/// Expects `GET {endpoint}/providers[?blockchain=..]` to answer with
/// `{"providers": [...], "total": n}`.
pub struct RemoteDirectory {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl RemoteDirectory {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn providers_url(&self, filter: &CandidateFilter) -> String {
        let base = format!("{}/providers", self.base_url.trim_end_matches('/'));
        match &filter.blockchain {
            Some(chain) => format!("{}?blockchain={}", base, urlencoding::encode(chain)),
            None => base,
        }
    }
}

#[async_trait]
impl ProviderDirectory for RemoteDirectory {
    async fn fetch_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProviderProfile>, DirectoryError> {
        let url = self.providers_url(filter);

        tracing::debug!("Fetching providers from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("X-Api-Key", api_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Provider directory error: {} - {}", status, body);
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch providers: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let total = json.get("total").and_then(|t| t.as_u64()).unwrap_or(0);

        let documents = json
            .get("providers")
            .and_then(|p| p.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing providers array".into()))?;

        let mut seen = HashSet::new();
        let profiles: Vec<ProviderProfile> = documents
            .iter()
            .filter_map(|doc| match serde_json::from_value::<ProviderProfile>(doc.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping malformed provider document: {}", e);
                    None
                }
            })
            .filter(|profile| match profile.check_consistency() {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!("Skipping inconsistent provider: {}", reason);
                    false
                }
            })
            // First occurrence of an id wins
            .filter(|profile| {
                if seen.insert(profile.id.clone()) {
                    true
                } else {
                    tracing::warn!("Skipping duplicate provider id: {}", profile.id);
                    false
                }
            })
            // Re-apply the filter locally
            .filter(|profile| filter.admits(profile))
            .collect();

        tracing::debug!("Fetched {} providers (total: {})", profiles.len(), total);

        Ok(profiles)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
