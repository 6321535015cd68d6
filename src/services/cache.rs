use crate::models::Candidate;
use crate::services::reports::{ReportsClient, ReportsError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const SNAPSHOT_KEY: &str = "reports:snapshot";

/// Errors that can occur while loading the candidate snapshot
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to load reports: {0}")]
    Fetch(#[from] Arc<ReportsError>),
}

/// In-process cache for the candidate snapshot
///
/// The report list is fetched once and reused for every ranking pass until the
/// TTL expires or the snapshot is invalidated. Concurrent misses share a single
/// fetch.
pub struct SnapshotCache {
    cache: moka::future::Cache<&'static str, Arc<Vec<Candidate>>>,
    ttl_secs: u64,
}

impl SnapshotCache {
    /// Create a new snapshot cache
    pub fn new(ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(4)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache, ttl_secs }
    }

    /// Get the cached snapshot, fetching it on a miss
    pub async fn get_or_fetch(&self, client: &ReportsClient) -> Result<Arc<Vec<Candidate>>, CacheError> {
        if let Some(snapshot) = self.cache.get(SNAPSHOT_KEY).await {
            tracing::trace!("Snapshot cache hit ({} reports)", snapshot.len());
            return Ok(snapshot);
        }

        tracing::trace!("Snapshot cache miss");
        let snapshot = self
            .cache
            .try_get_with(SNAPSHOT_KEY, async {
                client.fetch_reports().await.map(Arc::new)
            })
            .await?;

        Ok(snapshot)
    }

    /// Store a snapshot directly
    pub async fn insert(&self, snapshot: Vec<Candidate>) -> Arc<Vec<Candidate>> {
        let snapshot = Arc::new(snapshot);
        self.cache.insert(SNAPSHOT_KEY, snapshot.clone()).await;
        snapshot
    }

    /// Drop the cached snapshot so the next read fetches a fresh one
    pub async fn invalidate(&self) {
        self.cache.invalidate(SNAPSHOT_KEY).await;
        tracing::debug!("Invalidated report snapshot");
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let snapshot = self.cache.get(SNAPSHOT_KEY).await;
        CacheStats {
            cached: snapshot.is_some(),
            report_count: snapshot.map(|s| s.len()).unwrap_or(0),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub cached: bool,
    pub report_count: usize,
    pub ttl_secs: u64,
}
