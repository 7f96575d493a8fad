//! In-process TTL caches for scraped collections.
//!
//! These shield the origin site from repeated load: a write replaces the
//! whole payload and its deadline atomically, and an expired entry behaves
//! exactly like an absent one (callers recompute; nothing refreshes in the
//! background). Concurrent misses may trigger redundant fetches of the same
//! resource; callers accept that amplification instead of single-flighting.
//!
//! Both caches are plain values meant to be constructed and injected, never
//! held as process-wide globals.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

struct Entry<T> {
    expires_at: Instant,
    payload: T,
}

impl<T> Entry<T> {
    fn new(ttl: Duration, payload: T) -> Self {
        Self { expires_at: Instant::now() + ttl, payload }
    }

    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Single-slot TTL cache for a whole scraped collection.
pub struct TtlCache<T> {
    ttl: Duration,
    slot: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: RwLock::new(None) }
    }

    /// Return the payload if present and younger than the TTL.
    pub fn get(&self) -> Option<T> {
        let guard = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().filter(|e| e.is_fresh()).map(|e| e.payload.clone())
    }

    /// Replace the payload wholesale, timestamped at call time.
    pub fn put(&self, payload: T) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Entry::new(self.ttl, payload));
    }

    pub fn clear(&self) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Force the current entry past its deadline, for tests that control the clock.
    #[doc(hidden)]
    pub fn expire_now(&self) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = guard.as_mut() {
            entry.expires_at = Instant::now();
        }
    }
}

/// Per-key TTL cache, used for bill detail enrichment keyed by bill number.
pub struct KeyedTtlCache<K, V> {
    ttl: Duration,
    map: RwLock<HashMap<K, Entry<V>>>,
}

impl<K: Eq + Hash + Clone, V: Clone> KeyedTtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, map: RwLock::new(HashMap::new()) }
    }

    /// Return the payload for `key` if present and younger than the TTL.
    pub fn get(&self, key: &K) -> Option<V> {
        let guard = self.map.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).filter(|e| e.is_fresh()).map(|e| e.payload.clone())
    }

    /// Replace the entry for `key` wholesale, timestamped at call time.
    pub fn put(&self, key: K, payload: V) {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key, Entry::new(self.ttl, payload));
    }

    /// Drop entries past their deadline and return how many were removed.
    pub fn evict_expired(&self) -> usize {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, e| e.is_fresh());
        before - guard.len()
    }

    /// Force the entry for `key` past its deadline, for tests that control the clock.
    #[doc(hidden)]
    pub fn expire_now(&self, key: &K) {
        let mut guard = self.map.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = guard.get_mut(key) {
            entry.expires_at = Instant::now();
        }
    }
}
