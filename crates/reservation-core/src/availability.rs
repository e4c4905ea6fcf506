//! Availability Cache — bounded LRU with per-entry TTL, fronting the
//! Resource Repository for read traffic.
//!
//! Grounded in `vudo-p2p::sync_protocol::SyncState`'s `lru::LruCache` usage.
//! An LRU needs exclusive access to reorder its intrusive list on every
//! touch, so a `parking_lot::Mutex<LruCache<..>>` generalizes the teacher
//! workspace's concurrent-map idiom (`DashMap`'s `entry` API in
//! `api-gateway::rate_limit::RateLimiter`) rather than reusing `DashMap`
//! itself, which has no ordering.

use crate::error::CoreResult;
use crate::ids::ResourceId;
use crate::models::AvailabilityView;
use crate::resources;
use chrono::{DateTime, Utc};
use lru::LruCache;
use parking_lot::Mutex;
use sqlx::{Pool, Postgres};
use std::num::NonZeroUsize;
use std::time::Duration;

struct Entry {
    view: AvailabilityView,
    expires_at: DateTime<Utc>,
}

/// Cumulative operational counters, in the spirit of
/// `RateLimiter::cleanup`'s exposed counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: usize,
    pub ttl_ms: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Inner {
    map: LruCache<ResourceId, Entry>,
    hits: u64,
    misses: u64,
    evictions: u64,
}

pub struct AvailabilityCache {
    inner: Mutex<Inner>,
    ttl: Duration,
    max_size: usize,
}

impl AvailabilityCache {
    pub fn new(max_size: usize, ttl_ms: u64) -> Self {
        let capacity = NonZeroUsize::new(max_size.max(1)).expect("max_size.max(1) is never zero");
        Self {
            inner: Mutex::new(Inner {
                map: LruCache::new(capacity),
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            ttl: Duration::from_millis(ttl_ms),
            max_size,
        }
    }

    /// On hit-and-fresh, marks the entry most-recently-used and returns the
    /// view with `is_cached = true`. On hit-and-expired, deletes the entry
    /// and falls through. On miss, fetches the authoritative resource and
    /// materializes a fresh view.
    pub async fn get(&self, pool: &Pool<Postgres>, id: &ResourceId) -> CoreResult<AvailabilityView> {
        let now = Utc::now();

        {
            let mut inner = self.inner.lock();
            if let Some(entry) = inner.map.get(id) {
                if entry.expires_at > now {
                    inner.hits += 1;
                    let mut view = entry.view.clone();
                    view.is_cached = true;
                    return Ok(view);
                }
            }
            inner.map.pop(id);
            inner.misses += 1;
        }

        let mut conn = pool.acquire().await?;
        let resource = resources::find_by_id(&mut conn, id).await?;
        let view = AvailabilityView::from_resource(&resource, false);

        let mut inner = self.inner.lock();
        let was_full = inner.map.len() == self.max_size && !inner.map.contains(id);
        inner.map.put(
            id.clone(),
            Entry {
                view: view.clone(),
                expires_at: now + self.ttl,
            },
        );
        if was_full {
            inner.evictions += 1;
        }

        Ok(view)
    }

    /// Unconditionally removes the entry; never fails.
    pub fn invalidate(&self, id: &ResourceId) {
        self.inner.lock().map.pop(id);
    }

    /// Clears the map and resets hit/miss/eviction counters.
    pub fn invalidate_all(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.hits = 0;
        inner.misses = 0;
        inner.evictions = 0;
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            size: inner.map.len(),
            max_size: self.max_size,
            ttl_ms: self.ttl.as_millis() as u64,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_hit_rate_is_zero_with_no_traffic() {
        let stats = CacheStats::default();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn stats_hit_rate_divides_correctly() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..Default::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn new_accepts_zero_max_size_by_clamping_to_one() {
        let cache = AvailabilityCache::new(0, 1000);
        assert_eq!(cache.max_size, 0);
        assert_eq!(cache.inner.lock().map.cap().get(), 1);
    }
}
