//! Cache Store Module
//!
//! Main cache engine: a HashMap of entries guarded by one lock, with expiry
//! evaluated against an injected clock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};
use crate::config::CacheConfig;

#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    stats: CacheStats,
}

impl<K: Eq + Hash, V> Inner<K, V> {
    /// Returns the live entry for `key`, dropping it first if it has expired.
    fn live_entry<Q>(&mut self, key: &Q, now: DateTime<Utc>) -> Option<&CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let live = self.entries.get(key)?.is_live_at(now);
        if !live {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key)
    }

    fn store(&mut self, key: K, value: V, timeout: Option<Duration>, now: DateTime<Utc>) {
        self.entries.insert(key, CacheEntry::new(value, timeout, now));
    }
}

// == Cache ==
/// In-memory key-value store with optional per-entry timeouts.
///
/// Every operation is total: a missing or expired key shows up as `None`,
/// the caller's default, or `false`, never as an error. Expiry is checked on
/// access, so no background task is needed for correctness.
///
/// A single mutex covers the map, which makes the check-then-insert inside
/// [`add`](Cache::add) atomic with respect to every other caller.
///
/// # Example
/// ```
/// use chrono::Duration;
/// use dummycache::{Cache, ManualClock};
///
/// let clock = ManualClock::new();
/// let cache = Cache::with_clock(clock.clone());
///
/// cache.set("superman", "clark kent", Some(Duration::seconds(5)));
/// assert_eq!(cache.get("superman"), Some("clark kent"));
///
/// clock.advance(Duration::seconds(5));
/// assert_eq!(cache.get("superman"), None);
/// ```
#[derive(Debug)]
pub struct Cache<K, V, C = SystemClock> {
    inner: Mutex<Inner<K, V>>,
    clock: C,
    default_timeout: Option<Duration>,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty cache driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates an empty cache from configuration, using the system clock.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_clock(SystemClock).with_default_timeout(config.default_timeout)
    }
}

impl<K, V> Default for Cache<K, V, SystemClock>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash,
    V: Clone,
    C: Clock,
{
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            clock,
            default_timeout: None,
        }
    }

    /// Sets the timeout applied when `set`/`add` receive `None`.
    ///
    /// A zero or negative timeout is ignored, leaving untimed entries to
    /// live until deleted.
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout.filter(|timeout| *timeout > Duration::zero());
        self
    }

    /// Returns the clock this cache reads time from.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn effective_timeout(&self, timeout: Option<Duration>) -> Option<Duration> {
        timeout.or(self.default_timeout)
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// With no timeout the entry lives until deleted or cleared. A zero or
    /// negative timeout removes the key instead, so it reads as absent.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `timeout` - Optional lifetime, counted from now
    pub fn set(&self, key: K, value: V, timeout: Option<Duration>) {
        let timeout = self.effective_timeout(timeout);
        let mut inner = self.lock();

        if is_non_positive(timeout) {
            trace!("set with non-positive timeout, removing key");
            inner.entries.remove(&key);
            return;
        }

        let now = self.clock.now();
        inner.store(key, value, timeout, now);
        trace!(entries = inner.entries.len(), "entry stored");
    }

    // == Get ==
    /// Returns a clone of the live value stored under `key`.
    ///
    /// Liveness depends only on whether the entry exists and has not expired;
    /// an empty or zero value is returned like any other.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.lock();
        let now = self.clock.now();

        let value = inner.live_entry(key, now).map(|entry| entry.value.clone());
        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        value
    }

    /// Returns the live value stored under `key`, or `default`.
    pub fn get_or<Q>(&self, key: &Q, default: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).unwrap_or(default)
    }

    // == Add ==
    /// Stores `value` only if `key` has no live entry.
    ///
    /// Returns `true` when the entry was stored. Returns `false` and leaves
    /// the cache untouched when a live entry already exists, including its
    /// expiry. A zero or negative timeout never produces a retrievable entry,
    /// so it also returns `false`.
    pub fn add(&self, key: K, value: V, timeout: Option<Duration>) -> bool {
        let timeout = self.effective_timeout(timeout);
        let mut inner = self.lock();
        let now = self.clock.now();

        if inner.live_entry(&key, now).is_some() {
            trace!("add rejected, key already live");
            return false;
        }

        if is_non_positive(timeout) {
            trace!("add with non-positive timeout, nothing stored");
            return false;
        }

        inner.store(key, value, timeout, now);
        true
    }

    // == Delete ==
    /// Removes any entry for `key`. Missing keys are ignored.
    pub fn delete<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().entries.remove(key);
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&self) {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        debug!(removed, "cache cleared");
    }

    // == Contains Key ==
    /// Returns true if `key` has a live entry. Not counted in statistics.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.lock();
        let now = self.clock.now();
        inner.live_entry(key, now).is_some()
    }

    // == Time To Live ==
    /// Returns the remaining lifetime of the live entry under `key`.
    ///
    /// # Returns
    /// - `None` if the key has no live entry
    /// - `Some(None)` if the entry never expires
    /// - `Some(Some(remaining))` otherwise
    pub fn ttl<Q>(&self, key: &Q) -> Option<Option<Duration>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.lock();
        let now = self.clock.now();
        inner
            .live_entry(key, now)
            .map(|entry| entry.ttl_remaining(now))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();
        let now = self.clock.now();

        let before = inner.entries.len();
        inner.entries.retain(|_, entry| entry.is_live_at(now));
        before - inner.entries.len()
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        let inner = self.lock();
        let now = self.clock.now();
        inner
            .entries
            .values()
            .filter(|entry| entry.is_live_at(now))
            .count()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.entries.len();
        stats
    }
}

fn is_non_positive(timeout: Option<Duration>) -> bool {
    timeout.is_some_and(|timeout| timeout <= Duration::zero())
}
