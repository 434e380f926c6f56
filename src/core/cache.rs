//! In-process key/value cache with per-entry expiry.
//!
//! Eviction is lazy: an expired entry stays in the map until a `get` on its key
//! removes it. `stats` never evicts, so its `expired_keys` is only a snapshot.

use crate::domain::model::CacheStats;
use dashmap::DashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// Longest lifetime an entry can get. Larger TTLs are capped to it.
pub const MAX_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

fn expiry_from(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl).unwrap_or_else(|| now + MAX_TTL)
}

/// Shared by every request; wrap in `Arc` and hand it to whoever needs it.
#[derive(Debug)]
pub struct TtlCache<V> {
    store: DashMap<String, CacheEntry<V>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self::with_default_ttl(DEFAULT_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        // 過期檢查與刪除在同一個 shard 鎖內完成
        if self
            .store
            .remove_if(key, |_, entry| entry.is_expired(now))
            .is_some()
        {
            return None;
        }
        self.store.get(key).map(|entry| entry.value.clone())
    }

    pub fn set(&self, key: &str, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    pub fn set_with_ttl(&self, key: &str, value: V, ttl: Duration) {
        let expires_at = expiry_from(Instant::now(), ttl.min(MAX_TTL));
        self.store.insert(key.to_string(), CacheEntry { value, expires_at });
    }

    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let mut total_keys = 0;
        let mut live_keys = 0;
        for entry in self.store.iter() {
            total_keys += 1;
            if !entry.value().is_expired(now) {
                live_keys += 1;
            }
        }

        CacheStats {
            total_keys,
            live_keys,
            expired_keys: total_keys - live_keys,
        }
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
