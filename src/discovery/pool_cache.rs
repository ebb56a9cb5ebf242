use crate::core::PoolSnapshot;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cache entry with TTL
#[derive(Clone)]
struct CacheEntry {
    snapshot: Arc<PoolSnapshot>,
    expires_at: Instant,
}

/// Thread-safe snapshot cache with TTL, keyed by source
pub struct SnapshotCache {
    cache: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl SnapshotCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get snapshot from cache if not expired
    pub async fn get(&self, key: &str) -> Option<Arc<PoolSnapshot>> {
        if let Some(entry) = self.cache.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.snapshot.clone());
            }
            drop(entry);
            self.cache.remove(key);
        }

        None
    }

    pub async fn set(&self, key: String, snapshot: Arc<PoolSnapshot>) {
        let entry = CacheEntry {
            snapshot,
            expires_at: Instant::now() + self.ttl,
        };
        self.cache.insert(key, entry);
    }

    pub async fn invalidate(&self, key: &str) {
        self.cache.remove(key);
    }

    pub async fn clear(&self) {
        self.cache.clear();
    }

    pub fn size(&self) -> usize {
        self.cache.len()
    }

    /// Clean up expired entries
    pub async fn cleanup_expired(&self) {
        let now = Instant::now();
        self.cache.retain(|_, entry| entry.expires_at > now);
    }
}
