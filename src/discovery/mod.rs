pub mod pool_cache;
pub mod pool_graph;
pub mod source;
pub mod subgraph;

use crate::core::{Config, Pool, PoolSnapshot, ReserveUnits, SwapResult};
use log::{info, warn};
use std::sync::Arc;

pub use pool_cache::SnapshotCache;
pub use pool_graph::PoolGraph;
pub use source::{FileSource, SnapshotSource};
pub use subgraph::{PairRecord, PairToken, SubgraphClient};

/// Main interface for pool discovery
pub struct PoolDiscovery {
    source: Arc<dyn SnapshotSource>,
    cache: Arc<SnapshotCache>,
    units: ReserveUnits,
}

impl PoolDiscovery {
    /// Discovery over the configured subgraph.
    pub fn new(config: &Config) -> SwapResult<Self> {
        let source = Arc::new(SubgraphClient::new(config)?);
        Ok(Self::with_source(config, source))
    }

    pub fn with_source(config: &Config, source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            source,
            cache: Arc::new(SnapshotCache::new(config.cache_ttl_secs)),
            units: config.reserve_units,
        }
    }

    /// Cached snapshot for the source, fetching a fresh one once the TTL lapses.
    pub async fn load_snapshot(&self) -> SwapResult<Arc<PoolSnapshot>> {
        let key = self.source.cache_key();
        if let Some(snapshot) = self.cache.get(&key).await {
            return Ok(snapshot);
        }

        self.cache.cleanup_expired().await;
        let records = self.source.fetch_pairs().await?;
        let snapshot = Arc::new(build_snapshot(records, self.units));
        info!(
            "Loaded snapshot with {} pools ({} reserves) from {}",
            snapshot.len(),
            self.units,
            key
        );

        self.cache.set(key, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// Drop the cached snapshot so the next load refetches.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate(&self.source.cache_key()).await;
    }
}

/// Convert raw records into a snapshot, skipping malformed ones.
pub fn build_snapshot(records: Vec<PairRecord>, units: ReserveUnits) -> PoolSnapshot {
    let total = records.len();
    let pools: Vec<Pool> = records
        .into_iter()
        .filter_map(|record| {
            let id = record.id.clone();
            match record.into_pool(units) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!("Skipping pair {}: {}", id, e);
                    None
                }
            }
        })
        .collect();

    if pools.len() < total {
        warn!("Skipped {} of {} pair records", total - pools.len(), total);
    }

    PoolSnapshot::new(pools, units)
}
