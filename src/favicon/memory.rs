//! Byte-weighted in-memory LRU tier
//!
//! Entries are weighted by their decoded size rather than counted. Every read
//! and write goes through one mutex, so concurrent callers are serialized.

use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use lru::LruCache;

use crate::bitmap::Bitmap;

/// Values that know their own memory footprint
pub trait Weighted {
    fn weight(&self) -> usize;
}

impl Weighted for Bitmap {
    fn weight(&self) -> usize {
        self.byte_size()
    }
}

/// Called once for every entry pushed out to satisfy the budget.
/// Runs after the cache lock is released.
pub type EvictionCallback<K, V> = Box<dyn Fn(&K, &V) + Send + Sync>;

/// Memory cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Number of cached entries
    pub entries: usize,
    /// Total weight of cached entries
    pub size_bytes: usize,
    /// Configured budget
    pub budget_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl MemoryStats {
    /// Get the hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

struct Inner<K: Hash + Eq, V> {
    entries: LruCache<K, V>,
    size_bytes: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// LRU cache bounded by total weight
pub struct MemoryCache<K: Hash + Eq, V> {
    inner: Mutex<Inner<K, V>>,
    budget_bytes: usize,
    on_evict: Option<EvictionCallback<K, V>>,
}

impl<K: Hash + Eq, V: Weighted + Clone> MemoryCache<K, V> {
    /// Create a cache that holds at most `budget_bytes` of weight
    pub fn new(budget_bytes: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: LruCache::unbounded(),
                size_bytes: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            budget_bytes,
            on_evict: None,
        }
    }

    /// Install a callback invoked for each evicted entry
    pub fn with_eviction_callback(mut self, callback: EvictionCallback<K, V>) -> Self {
        self.on_evict = Some(callback);
        self
    }

    // Every mutation leaves `Inner` consistent before anything can panic, so a
    // poisoned lock still guards valid state.
    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up an entry, marking it most recently used
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();
        let found = inner.entries.get(key).cloned();
        match found {
            Some(value) => {
                inner.hits += 1;
                Some(value)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains(key)
    }

    /// Insert an entry, evicting least recently used entries until the budget
    /// holds. Returns false if the value alone exceeds the budget; such values
    /// are not admitted and any previous entry under `key` is kept.
    pub fn insert(&self, key: K, value: V) -> bool {
        let weight = value.weight();
        if weight > self.budget_bytes {
            log::debug!(
                "Refusing {} byte entry, memory budget is {} bytes",
                weight,
                self.budget_bytes
            );
            return false;
        }

        let mut evicted = Vec::new();
        {
            let mut inner = self.lock();
            if let Some(old) = inner.entries.put(key, value) {
                inner.size_bytes = inner.size_bytes.saturating_sub(old.weight());
            }
            inner.size_bytes += weight;

            while inner.size_bytes > self.budget_bytes {
                let Some(entry) = inner.entries.pop_lru() else {
                    break;
                };
                inner.size_bytes = inner.size_bytes.saturating_sub(entry.1.weight());
                inner.evictions += 1;
                evicted.push(entry);
            }
        }

        if let Some(callback) = &self.on_evict {
            for (evicted_key, evicted_value) in &evicted {
                callback(evicted_key, evicted_value);
            }
        }
        true
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.size_bytes = 0;
    }

    /// Get cache statistics
    pub fn stats(&self) -> MemoryStats {
        let inner = self.lock();
        MemoryStats {
            entries: inner.entries.len(),
            size_bytes: inner.size_bytes,
            budget_bytes: self.budget_bytes,
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Blob(usize);

    impl Weighted for Blob {
        fn weight(&self) -> usize {
            self.0
        }
    }

    #[test]
    fn test_evicts_least_recently_used_first() {
        let cache = MemoryCache::new(30);
        cache.insert("a", Blob(10));
        cache.insert("b", Blob(10));
        cache.insert("c", Blob(10));

        // Touch "a" so "b" becomes the oldest
        assert!(cache.get(&"a").is_some());
        cache.insert("d", Blob(10));

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert!(cache.contains(&"d"));
        assert_eq!(cache.stats().size_bytes, 30);
    }

    #[test]
    fn test_large_insert_evicts_several() {
        let cache = MemoryCache::new(100);
        for key in 0..5 {
            cache.insert(key, Blob(20));
        }
        cache.insert(99, Blob(70));

        let stats = cache.stats();
        assert!(stats.size_bytes <= 100);
        assert_eq!(stats.evictions, 4);
        assert!(cache.contains(&99));
        assert!(cache.contains(&4));
    }

    #[test]
    fn test_oversized_value_rejected() {
        let cache = MemoryCache::new(10);
        cache.insert("keep", Blob(5));
        assert!(!cache.insert("huge", Blob(11)));
        assert!(cache.contains(&"keep"));
        assert_eq!(cache.stats().size_bytes, 5);
    }

    #[test]
    fn test_replacing_key_adjusts_size() {
        let cache = MemoryCache::new(100);
        cache.insert("k", Blob(40));
        cache.insert("k", Blob(15));
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.size_bytes, 15);
    }

    #[test]
    fn test_eviction_callback_sees_evicted_entries() {
        let evicted = Arc::new(AtomicUsize::new(0));
        let counter = evicted.clone();
        let cache = MemoryCache::new(20).with_eviction_callback(Box::new(
            move |_key: &&str, value: &Blob| {
                counter.fetch_add(value.0, Ordering::SeqCst);
            },
        ));

        cache.insert("a", Blob(12));
        cache.insert("b", Blob(12));

        assert_eq!(evicted.load(Ordering::SeqCst), 12);
        assert!(!cache.contains(&"a"));
    }

    #[test]
    fn test_hit_miss_accounting() {
        let cache = MemoryCache::new(10);
        cache.insert(1, Blob(1));
        cache.get(&1);
        cache.get(&2);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_clear() {
        let cache = MemoryCache::new(10);
        cache.insert(1, Blob(3));
        cache.insert(2, Blob(4));
        cache.clear();
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(cache.stats().size_bytes, 0);
    }

    #[test]
    fn test_panicking_callback_leaves_cache_usable() {
        let cache = Arc::new(MemoryCache::new(10).with_eviction_callback(Box::new(
            |key: &u32, _value: &Blob| {
                if *key == 1 {
                    panic!("eviction callback failed");
                }
            },
        )));
        cache.insert(1, Blob(6));

        let worker = cache.clone();
        let result = std::thread::spawn(move || worker.insert(2, Blob(6))).join();
        assert!(result.is_err());

        // The eviction itself completed before the callback ran
        let stats = cache.stats();
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.size_bytes, 6);
        assert_eq!(stats.evictions, 1);

        assert!(cache.insert(3, Blob(4)));
        assert_eq!(cache.get(&2), Some(Blob(6)));
        assert_eq!(cache.stats().size_bytes, 10);
    }
}
