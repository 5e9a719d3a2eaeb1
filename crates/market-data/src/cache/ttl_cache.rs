//! In-memory TTL cache with expiry-on-read.
//!
//! Entries are valid while `now - inserted_at < ttl`. There is no background
//! sweeper: a stale entry is removed by the first `get` that observes it.
//! The cache is constructed explicitly and handed to its owner, never stored
//! in a global.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::clock::{Clock, SystemClock};

/// Default time-to-live for entries stored with [`TtlCache::set`].
pub const DEFAULT_TTL: Duration = Duration::from_millis(30_000);

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: DateTime<Utc>,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        // A clock that went backwards counts as zero elapsed time.
        let elapsed = (now - self.inserted_at).to_std().unwrap_or(Duration::ZERO);
        elapsed < self.ttl
    }
}

/// Key/value store with per-entry time-to-live.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache on the system clock with the 30 second default TTL.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_TTL)
    }

    /// Create a cache reading time from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
            default_ttl,
        }
    }

    /// Lock the entries map, recovering from poison.
    ///
    /// A poisoned map can at worst hold an entry that was being replaced,
    /// which the next TTL check or `set` corrects.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Get a value if present and unexpired.
    ///
    /// A stale entry is evicted and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock_entries();

        match entries.get(key) {
            Some(entry) if entry.is_fresh(now) => Some(entry.value.clone()),
            Some(_) => {
                debug!("Cache entry '{}' expired, evicting", key);
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a value with the default TTL, replacing any existing entry.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Store a value with an explicit TTL, replacing any existing entry.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            inserted_at: self.clock.now(),
            ttl,
        };
        self.lock_entries().insert(key.into(), entry);
    }

    /// Remove a single entry.
    pub fn invalidate(&self, key: &str) {
        self.lock_entries().remove(key);
    }

    /// Remove every entry whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.lock_entries().retain(|key, _| !key.starts_with(prefix));
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.lock_entries().clear();
    }

    /// Number of stored entries, including stale ones not yet evicted.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every unexpired value. Does not evict.
    pub fn fresh_values(&self) -> Vec<V> {
        let now = self.clock.now();
        self.lock_entries()
            .values()
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone())
            .collect()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
