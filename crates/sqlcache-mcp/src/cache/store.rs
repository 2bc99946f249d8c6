//! Bounded in-memory cache with TTL support

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Serialize;

use super::config::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};

/// Cache entry with value and insertion time
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
    seq: u64,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) > ttl
    }
}

/// Cache counters for observability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Values stored, overwrites included
    pub inserts: u64,
    /// Entries dropped to make room for a new key
    pub evictions: u64,
    /// Entries dropped on lookup because their TTL elapsed
    pub expirations: u64,
    /// Full invalidations
    pub clears: u64,
    /// Values dropped because a clear happened while they were computed
    pub stale_puts: u64,
    /// Entries currently held, expired ones included until looked up
    pub entries: u64,
}

struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Insertion sequence -> key; the first entry is the oldest insertion
    order: BTreeMap<u64, K>,
    next_seq: u64,
    /// Bumped on clear
    generation: u64,
    stats: CacheStats,
}

impl<K, V> Inner<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            next_seq: 0,
            generation: 0,
            stats: CacheStats::default(),
        }
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(&entry.seq);
        Some(entry)
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.entries.remove(&key);
        Some(key)
    }
}

/// Thread-safe bounded cache with absolute TTL
///
/// # Expiry
///
/// An entry older than the TTL is treated as absent and removed the next time
/// it is looked up. Reads never refresh the insertion time and nothing runs in
/// the background.
///
/// # Eviction
///
/// When `max_entries` is reached and a new key arrives, the entry inserted
/// first is evicted, no matter how recently it was read. This is FIFO by
/// insertion, not LRU. Overwriting a key moves it to the back of the queue.
///
/// # Locking
///
/// One mutex guards the map and the insertion-order index together, since
/// eviction reads the global oldest entry.
pub struct TtlCache<K, V> {
    name: &'static str,
    inner: Mutex<Inner<K, V>>,
    ttl: Duration,
    max_entries: NonZeroUsize,
    enabled: bool,
}

impl<K, V> fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("ttl", &self.ttl)
            .field("max_entries", &self.max_entries)
            .field("enabled", &self.enabled)
            .field("entry_count", &self.inner.lock().entries.len())
            .finish_non_exhaustive()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: Clone,
{
    #[must_use]
    pub fn new(name: &'static str, ttl: Duration, max_entries: NonZeroUsize) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner::new()),
            ttl,
            max_entries,
            enabled: true,
        }
    }

    /// Cache that never stores anything
    #[must_use]
    pub fn disabled(name: &'static str) -> Self {
        Self {
            enabled: false,
            ..Self::new(name, DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub const fn max_entries(&self) -> NonZeroUsize {
        self.max_entries
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a live entry, dropping it if its TTL has elapsed
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let mut inner = self.inner.lock();

        let lookup = inner
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(self.ttl, now)).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => {
                inner.stats.hits += 1;
                drop(inner);
                tracing::debug!(cache.name = self.name, cache.key = %key, cache.result = "hit");
                return Some(value);
            }
            Some(None) => {
                inner.remove(key);
                inner.stats.expirations += 1;
            }
            None => {}
        }
        inner.stats.misses += 1;
        drop(inner);

        tracing::debug!(cache.name = self.name, cache.key = %key, cache.result = "miss");
        None
    }

    /// Store a value, evicting the oldest insertion when full
    pub fn put(&self, key: K, value: V) {
        if !self.enabled {
            return;
        }

        let mut inner = self.inner.lock();
        let evicted = self.insert_locked(&mut inner, key, value);
        drop(inner);

        self.log_eviction(evicted.as_ref());
    }

    /// Current generation; advanced by every [`clear`](Self::clear)
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Store a value only if no clear happened since `generation` was read.
    ///
    /// Returns whether the value was stored. Callers read the generation before
    /// producing the value, so a result computed before an invalidation is
    /// dropped instead of outliving it.
    pub fn put_if_generation(&self, key: K, value: V, generation: u64) -> bool {
        if !self.enabled {
            return false;
        }

        let mut inner = self.inner.lock();
        if inner.generation != generation {
            inner.stats.stale_puts += 1;
            drop(inner);
            tracing::debug!(
                cache.name = self.name,
                cache.key = %key,
                "Cache cleared while value was computed, not storing"
            );
            return false;
        }

        let evicted = self.insert_locked(&mut inner, key, value);
        drop(inner);

        self.log_eviction(evicted.as_ref());
        true
    }

    fn insert_locked(&self, inner: &mut Inner<K, V>, key: K, value: V) -> Option<K> {
        let evicted =
            if inner.remove(&key).is_none() && inner.entries.len() >= self.max_entries.get() {
                inner.evict_oldest()
            } else {
                None
            };

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.order.insert(seq, key.clone());
        inner.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
                seq,
            },
        );
        inner.stats.inserts += 1;
        if evicted.is_some() {
            inner.stats.evictions += 1;
        }
        evicted
    }

    fn log_eviction(&self, evicted: Option<&K>) {
        if let Some(old) = evicted {
            tracing::debug!(cache.name = self.name, cache.evicted = %old, "Cache full, evicted oldest entry");
        }
    }

    /// Remove every entry; returns how many were dropped
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.entries.len();
        inner.entries.clear();
        inner.order.clear();
        inner.generation += 1;
        inner.stats.clears += 1;
        drop(inner);

        tracing::debug!(
            cache.name = self.name,
            cache.cleared = count,
            "Cache cleared"
        );
        count
    }

    /// Number of held entries, expired ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `key` is held, ignoring expiry and without touching counters
    #[cfg(test)]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            entries: inner.entries.len() as u64,
            ..inner.stats
        }
    }
}
