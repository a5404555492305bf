use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::models::{CandidateFilter, ProviderProfile};
use crate::services::directory::{DirectoryError, ProviderDirectory};

/// TTL cache in front of a provider directory
///
/// Candidate pools are cached per filter. Failed fetches are not cached.
pub struct CachedDirectory {
    inner: Arc<dyn ProviderDirectory>,
    pools: moka::future::Cache<String, Arc<Vec<ProviderProfile>>>,
}

impl CachedDirectory {
    pub fn new(inner: Arc<dyn ProviderDirectory>, capacity: u64, ttl_secs: u64) -> Self {
        let pools = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, pools }
    }

    /// Drop every cached pool
    pub fn invalidate_all(&self) {
        self.pools.invalidate_all();
        tracing::debug!("Invalidated all cached provider pools");
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.pools.entry_count(),
        }
    }
}

#[async_trait]
impl ProviderDirectory for CachedDirectory {
    async fn fetch_candidates(
        &self,
        filter: &CandidateFilter,
    ) -> Result<Vec<ProviderProfile>, DirectoryError> {
        let key = CacheKey::candidates(filter);

        if let Some(pool) = self.pools.get(&key).await {
            tracing::trace!("Cache hit: {}", key);
            return Ok(pool.as_ref().clone());
        }

        tracing::trace!("Cache miss: {}", key);
        let pool = self.inner.fetch_candidates(filter).await?;
        self.pools.insert(key, Arc::new(pool.clone())).await;

        Ok(pool)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a candidate pool
    ///
    /// Uses the filter verbatim, as it is sent to the upstream directory.
    pub fn candidates(filter: &CandidateFilter) -> String {
        format!("candidates:{}", filter)
    }
}
