//! Process-wide cache of anonymous list pages

use crate::entry::CacheEntry;
use crate::stats::{CacheStats, Counters};
use dashmap::DashMap;
use lorekeeper_core::{CacheSettings, ResourceKind, DEFAULT_LIST_CACHE_TTL_SECS};
use lorekeeper_utils::{cache_event, cache_invalidated};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{trace, warn};

static GLOBAL: Lazy<Arc<AnonymousListCache>> = Lazy::new(|| {
    Arc::new(AnonymousListCache::new(Duration::from_secs(
        DEFAULT_LIST_CACHE_TTL_SECS,
    )))
});

/// TTL cache keyed by `<kind>:list:<hash>`.
///
/// Expired entries are dropped lazily on the read that finds them. Any
/// failure inside the cache is reported as a miss and never reaches the
/// caller.
///
/// Every invalidated prefix carries a generation. A reader captures
/// [`AnonymousListCache::generation`] before querying storage and writes
/// back with [`AnonymousListCache::insert_if_current`], so a page computed
/// before an invalidation is never stored after it.
#[derive(Debug)]
pub struct AnonymousListCache {
    entries: DashMap<String, CacheEntry>,
    generations: DashMap<String, u64>,
    ttl: Duration,
    enabled: bool,
    counters: Counters,
}

impl AnonymousListCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            generations: DashMap::new(),
            ttl,
            enabled: true,
            counters: Counters::default(),
        }
    }

    /// A cache that never stores anything and always misses
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    #[must_use]
    pub fn from_settings(settings: &CacheSettings) -> Self {
        if settings.enabled {
            Self::new(settings.ttl())
        } else {
            Self::disabled()
        }
    }

    /// The cache shared by every service in the process
    #[must_use]
    pub fn global() -> Arc<AnonymousListCache> {
        Arc::clone(&GLOBAL)
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Look up `key`, decoding the stored value as `T`
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let Some(entry) = self.entries.get(key) else {
            self.counters.record_miss();
            cache_event(key, false);
            return None;
        };

        if entry.is_expired_at(Instant::now()) {
            // Release the shard lock before removing
            drop(entry);
            self.entries
                .remove_if(key, |_, e| e.is_expired_at(Instant::now()));
            self.counters.record_expired();
            trace!(key = %key, "cache entry expired");
            cache_event(key, false);
            return None;
        }

        match serde_json::from_str::<T>(&entry.value) {
            Ok(value) => {
                self.counters.record_hit();
                cache_event(key, true);
                Some(value)
            }
            Err(e) => {
                drop(entry);
                self.entries.remove(key);
                self.counters.record_corrupt();
                warn!(key = %key, error = %e, "discarding undecodable cache entry");
                None
            }
        }
    }

    /// Store `value` under `key` for the configured TTL
    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        self.insert_with_ttl(key, value, self.ttl);
    }

    /// Store `value` under `key` for `ttl`
    pub fn insert_with_ttl<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        if !self.enabled {
            return;
        }
        let key = key.into();
        match serde_json::to_string(value) {
            Ok(serialized) => {
                let entry = CacheEntry::new(serialized, Instant::now() + ttl);
                self.entries.insert(key, entry);
                self.counters.record_write();
            }
            Err(e) => {
                warn!(key = %key, error = %e, "value not cacheable, skipping");
            }
        }
    }

    /// Invalidation generation covering `key`.
    ///
    /// The sum of the generations of every prefix of `key`; it grows whenever
    /// an invalidation could have removed `key`.
    #[must_use]
    pub fn generation(&self, key: &str) -> u64 {
        self.generations
            .iter()
            .filter(|g| key.starts_with(g.key().as_str()))
            .map(|g| *g.value())
            .sum()
    }

    /// Store `value` under `key` unless `key` was invalidated after
    /// `generation` was read. Returns whether the entry was kept.
    pub fn insert_if_current<T: Serialize>(
        &self,
        key: impl Into<String>,
        value: &T,
        generation: u64,
    ) -> bool {
        if !self.enabled {
            return false;
        }
        let key = key.into();
        if self.generation(&key) != generation {
            self.counters.record_stale();
            trace!(key = %key, "skipping write-back of a page invalidated in flight");
            return false;
        }
        self.insert(key.clone(), value);

        // An invalidation between the check and the insert may have run its
        // sweep before the entry landed
        if self.generation(&key) != generation {
            self.entries.remove(&key);
            self.counters.record_stale();
            trace!(key = %key, "dropping page invalidated during write-back");
            return false;
        }
        true
    }

    /// Return the cached value for `key`, or run `compute` and cache its
    /// successful result. Errors from `compute` are returned and not cached,
    /// and a result whose key was invalidated while computing is returned
    /// without being cached.
    pub async fn get_or_try_insert_with<T, E, F, Fut>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            return Ok(hit);
        }
        let generation = self.generation(key);
        let value = compute().await?;
        self.insert_if_current(key, &value, generation);
        Ok(value)
    }

    /// Remove every entry whose key starts with `prefix`
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        // Bump before sweeping so in-flight readers see the change
        *self.generations.entry(prefix.to_string()).or_insert(0) += 1;
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let keep = !key.starts_with(prefix);
            if !keep {
                removed += 1;
            }
            keep
        });
        self.counters.record_invalidated(removed);
        cache_invalidated(prefix, removed);
        removed
    }

    /// Remove every cached list page of `kind`
    pub fn invalidate_kind(&self, kind: ResourceKind) -> usize {
        self.invalidate_prefix(&kind.list_prefix())
    }

    /// Remove a single entry
    pub fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&self) {
        // The empty prefix covers every key
        *self.generations.entry(String::new()).or_insert(0) += 1;
        let removed = self.entries.len();
        self.entries.clear();
        self.counters.record_invalidated(removed);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    /// Overwrite the raw stored text of an entry; used to simulate damage
    #[cfg(test)]
    pub(crate) fn put_raw(&self, key: &str, raw: &str) {
        self.entries.insert(
            key.to_string(),
            CacheEntry::new(raw.to_string(), Instant::now() + self.ttl),
        );
    }
}
