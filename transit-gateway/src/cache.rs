//! Caching layer for SL station lookups.
//!
//! Typeahead results are cached by the exact query string: no case or
//! whitespace folding, so `"central"` and `"Central"` are separate entries.
//! Departures are real-time and always go to the upstream.
//!
//! Entries expire after a TTL and the cache is bounded; moka evicts the
//! least useful entries once `max_capacity` is reached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::SiteId;
use crate::sl::{ResponseData, SlClient, SlError, StopLookupResult};

/// Cached lookup entry.
type LookupEntry = Arc<Vec<StopLookupResult>>;

/// Configuration for the station cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached queries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of station lookup results, keyed by raw query string.
pub struct StationCache {
    lookups: MokaCache<String, LookupEntry>,
}

impl StationCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let lookups = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { lookups }
    }

    /// Get a cached lookup.
    pub async fn get(&self, query: &str) -> Option<LookupEntry> {
        self.lookups.get(query).await
    }

    /// Insert a lookup result, replacing any existing entry.
    pub async fn insert(&self, query: String, entry: LookupEntry) {
        self.lookups.insert(query, entry).await;
    }

    /// Number of cached queries.
    ///
    /// Eventually consistent: call [`StationCache::sync`] first if an exact
    /// figure is needed.
    pub fn entry_count(&self) -> u64 {
        self.lookups.entry_count()
    }

    /// Flush pending maintenance so `entry_count` is up to date.
    pub async fn sync(&self) {
        self.lookups.run_pending_tasks().await;
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.lookups.invalidate_all();
    }
}

/// SL client with a station lookup cache.
///
/// Wraps an `SlClient`; departures pass straight through.
pub struct CachedSlClient {
    client: SlClient,
    cache: StationCache,
}

impl CachedSlClient {
    /// Create a new cached client.
    pub fn new(client: SlClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: StationCache::new(cache_config),
        }
    }

    /// Get departures for a site. Never cached.
    pub async fn get_departures(&self, site_id: &SiteId) -> Result<ResponseData, SlError> {
        self.client.get_departures(site_id).await
    }

    /// Search stations, using the cache if the exact query was seen before.
    ///
    /// Failed lookups are not cached. Two concurrent misses for the same
    /// query both hit the upstream; the later insert wins.
    pub async fn search_stations(&self, query: &str) -> Result<LookupEntry, SlError> {
        if let Some(cached) = self.cache.get(query).await {
            tracing::debug!(query, "station lookup cache hit");
            return Ok(cached);
        }

        let stations = self.client.search_stations(query).await?;
        let entry = Arc::new(stations);

        self.cache.insert(query.to_string(), entry.clone()).await;

        Ok(entry)
    }
}
