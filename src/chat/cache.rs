//! ResponseCache - TTL and capacity bounded answer cache
//!
//! - Entries older than the TTL are treated as absent and evicted lazily on
//!   lookup.
//! - When an insert pushes the cache over capacity, the oldest inserted entry
//!   is evicted. Overwriting a key refreshes its timestamp and moves it to
//!   the back of the eviction queue.
//!
//! Owned by a single session, so no locking.

use instant::Instant;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created: Instant,
}

pub struct ResponseCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Keys in insertion order (oldest first)
    order: VecDeque<String>,
    ttl: Duration,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<V: Clone> ResponseCache<V> {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn put(&mut self, key: &str, value: V) {
        self.put_at(key, value, Instant::now())
    }

    /// Lookup as of `now`
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.misses += 1;
                return None;
            }
            Some(entry) => now > entry.created && now.duration_since(entry.created) >= self.ttl,
        };

        if expired {
            self.remove(key);
            self.misses += 1;
            return None;
        }

        self.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Insert as of `now`
    pub fn put_at(&mut self, key: &str, value: V, now: Instant) {
        if self.capacity == 0 {
            return;
        }

        if self.entries.contains_key(key) {
            self.order.retain(|k| k != key);
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                created: now,
            },
        );
        self.order.push_back(key.to_string());

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.order.retain(|k| k != key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        (self.hits as f64 / total as f64) * 100.0
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(text: &str) -> String {
        text.to_string()
    }

    fn cache() -> ResponseCache<String> {
        ResponseCache::new(Duration::from_secs(300), 50)
    }

    #[test]
    fn test_hit_within_ttl() {
        let mut cache = cache();
        let t0 = Instant::now();
        cache.put_at("q", reply("a"), t0);

        let hit = cache.get_at("q", t0 + Duration::from_secs(299)).unwrap();
        assert_eq!(hit, "a");
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let mut cache = cache();
        let t0 = Instant::now();
        cache.put_at("q", reply("a"), t0);

        assert!(cache.get_at("q", t0 + Duration::from_secs(300)).is_none());
        assert!(!cache.contains("q"));
        assert_eq!(cache.misses(), 1);
    }

    #[test]
    fn test_51st_key_evicts_oldest() {
        let mut cache = cache();
        let t0 = Instant::now();
        for i in 0..50 {
            cache.put_at(&format!("q{}", i), reply("a"), t0);
        }
        assert_eq!(cache.len(), 50);

        cache.put_at("q50", reply("a"), t0);
        assert_eq!(cache.len(), 50);
        assert!(!cache.contains("q0"));
        for i in 1..=50 {
            assert!(cache.contains(&format!("q{}", i)), "q{} evicted", i);
        }
    }

    #[test]
    fn test_overwrite_refreshes_position() {
        let mut cache = ResponseCache::new(Duration::from_secs(300), 2);
        let t0 = Instant::now();
        cache.put_at("a", reply("1"), t0);
        cache.put_at("b", reply("2"), t0);
        cache.put_at("a", reply("3"), t0);
        cache.put_at("c", reply("4"), t0);

        assert!(!cache.contains("b"));
        assert_eq!(cache.get_at("a", t0).unwrap(), "3");
    }

    #[test]
    fn test_overwrite_refreshes_timestamp() {
        let mut cache = cache();
        let t0 = Instant::now();
        cache.put_at("q", reply("old"), t0);
        cache.put_at("q", reply("new"), t0 + Duration::from_secs(200));

        let hit = cache.get_at("q", t0 + Duration::from_secs(400)).unwrap();
        assert_eq!(hit, "new");
    }

    #[test]
    fn test_zero_capacity_disables() {
        let mut cache = ResponseCache::new(Duration::from_secs(300), 0);
        cache.put("q", reply("a"));
        assert!(cache.is_empty());
        assert!(cache.get("q").is_none());
    }

    #[test]
    fn test_hit_rate_and_clear() {
        let mut cache = cache();
        cache.put("q", reply("a"));
        cache.get("q");
        cache.get("missing");
        assert!((cache.hit_rate() - 50.0).abs() < 0.01);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.hit_rate(), 0.0);
    }
}
