//! In-memory TTL cache for video lookups

use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::models::VideoDescriptor;

/// Key/value cache with per-entry expiry. Used only by the video selector.
pub trait VideoCache: Send + Sync {
    fn get(&self, key: &str) -> Option<VideoDescriptor>;
    fn set(&self, key: &str, value: VideoDescriptor, ttl: Duration);
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Concurrent map with lazy expiry. Concurrent writes to one key are last-write-wins.
pub struct TtlCache<V> {
    entries: DashMap<String, CacheEntry<V>>,
    /// Expired entries are swept when the map grows past this size
    sweep_threshold: usize,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            sweep_threshold: 256,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if entry.expires_at > Instant::now() {
            return Some(entry.value.clone());
        }
        drop(entry);
        self.entries.remove_if(key, |_, e| e.expires_at <= Instant::now());
        None
    }

    pub fn set(&self, key: &str, value: V, ttl: Duration) {
        if self.len() > self.sweep_threshold {
            self.purge_expired();
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, e| e.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoCache for TtlCache<VideoDescriptor> {
    fn get(&self, key: &str) -> Option<VideoDescriptor> {
        TtlCache::get(self, key)
    }

    fn set(&self, key: &str, value: VideoDescriptor, ttl: Duration) {
        log::debug!("[VIDEO] Caching '{}' for {}s", key, ttl.as_secs());
        TtlCache::set(self, key, value, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_get_within_ttl() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("a", 1, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn test_expired_entries_are_absent() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("a", 1, Duration::from_millis(10));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_last_write_wins() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("a", 1, Duration::from_secs(60));
        cache.set("a", 2, Duration::from_secs(60));
        assert_eq!(cache.get("a"), Some(2));
    }

    #[test]
    fn test_concurrent_writers() {
        let cache: Arc<TtlCache<usize>> = Arc::new(TtlCache::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(&format!("k{}", i % 10), t, Duration::from_secs(60));
                        let _ = cache.get("k0");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 10);
        assert!(cache.get("k3").unwrap() < 8);
    }

    #[test]
    fn test_purge_expired() {
        let cache: TtlCache<u32> = TtlCache::new();
        cache.set("old", 1, Duration::from_millis(1));
        cache.set("new", 2, Duration::from_secs(60));
        thread::sleep(Duration::from_millis(10));
        cache.purge_expired();
        assert_eq!(cache.len(), 1);
    }
}
