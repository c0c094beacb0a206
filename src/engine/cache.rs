use std::{
    collections::{hash_map::DefaultHasher, HashMap},
    hash::{Hash, Hasher},
    sync::Mutex,
    time::{Duration, Instant},
};

use tracing::debug;

use super::allocation::BudgetEngine;
use crate::{
    config::AppConfig,
    types::{AllocationResult, TripRequest},
    Result,
};

/// Cache key for a request: a hash of its canonical JSON form.
pub fn request_key(request: &TripRequest) -> Result<u64> {
    let canonical = serde_json::to_string(request)?;
    let mut hasher = DefaultHasher::new();
    canonical.hash(&mut hasher);
    Ok(hasher.finish())
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: AllocationResult,
    inserted_at: Instant,
}

/// Allocation results keyed by request hash, with a fixed lifetime and size.
///
/// Owned by the caller. A capacity of zero disables caching.
#[derive(Debug)]
pub struct AllocationCache {
    ttl: Duration,
    capacity: usize,
    entries: HashMap<u64, CacheEntry>,
}

impl AllocationCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity,
            entries: HashMap::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.cache_ttl(), config.cache_capacity)
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    pub fn get(&self, key: u64) -> Option<AllocationResult> {
        self.get_at(key, Instant::now())
    }

    /// Look up `key` as of `now`; entries at or past their TTL are misses.
    pub fn get_at(&self, key: u64, now: Instant) -> Option<AllocationResult> {
        self.entries
            .get(&key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.result.clone())
    }

    pub fn insert(&mut self, key: u64, result: AllocationResult) {
        self.insert_at(key, result, Instant::now());
    }

    /// Store `result`, dropping expired entries first and then the oldest one if full.
    pub fn insert_at(&mut self, key: u64, result: AllocationResult, now: Instant) {
        if self.capacity == 0 {
            return;
        }

        self.purge_expired(now);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(key, _)| *key)
            {
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                result,
                inserted_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) >= self.ttl
    }

    fn purge_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.inserted_at) < ttl);
    }
}

/// A [`BudgetEngine`] that reuses results for identical requests.
#[derive(Debug)]
pub struct CachedEngine {
    engine: BudgetEngine,
    cache: Mutex<AllocationCache>,
}

impl CachedEngine {
    pub fn new(engine: BudgetEngine, cache: AllocationCache) -> Self {
        Self {
            engine,
            cache: Mutex::new(cache),
        }
    }

    pub fn allocate(&self, request: &TripRequest) -> Result<AllocationResult> {
        let key = request_key(request)?;
        if let Some(hit) = self.lock().get(key) {
            debug!(key, "allocation cache hit");
            return Ok(hit);
        }

        let result = self.engine.allocate(request)?;
        self.lock().insert(key, result.clone());
        Ok(result)
    }

    pub fn cached_entries(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AllocationCache> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for CachedEngine {
    fn default() -> Self {
        Self::new(
            BudgetEngine::new(),
            AllocationCache::from_config(&AppConfig::default()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Budget, Priority, Traveler};

    fn request(destination: &str) -> TripRequest {
        TripRequest::new(
            destination,
            "2025-01-01".parse().unwrap(),
            "2025-01-05".parse().unwrap(),
            Budget::new(20000.0, "USD"),
            Priority::Accommodation,
        )
        .with_travelers([Traveler::adult(), Traveler::adult()])
    }

    fn result_for(destination: &str) -> AllocationResult {
        BudgetEngine::new().allocate(&request(destination)).unwrap()
    }

    #[test]
    fn test_request_key_is_stable() {
        let a = request_key(&request("Tokyo")).unwrap();
        let b = request_key(&request("Tokyo")).unwrap();
        let c = request_key(&request("Paris")).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let mut cache = AllocationCache::new(Duration::from_secs(60), 4);
        let start = Instant::now();
        cache.insert_at(1, result_for("Tokyo"), start);

        assert!(cache.get_at(1, start + Duration::from_secs(59)).is_some());
        assert!(cache.get_at(1, start + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn test_oldest_entry_evicted_at_capacity() {
        let mut cache = AllocationCache::new(Duration::from_secs(600), 2);
        let start = Instant::now();
        cache.insert_at(1, result_for("Tokyo"), start);
        cache.insert_at(2, result_for("Paris"), start + Duration::from_secs(1));
        cache.insert_at(3, result_for("Bali"), start + Duration::from_secs(2));

        let now = start + Duration::from_secs(3);
        assert_eq!(cache.len(), 2);
        assert!(cache.get_at(1, now).is_none());
        assert!(cache.get_at(2, now).is_some());
        assert!(cache.get_at(3, now).is_some());
    }

    #[test]
    fn test_zero_capacity_disables_cache() {
        let mut cache = AllocationCache::disabled();
        cache.insert(1, result_for("Tokyo"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cached_engine_reuses_result() {
        let engine = CachedEngine::new(
            BudgetEngine::new(),
            AllocationCache::new(Duration::from_secs(300), 8),
        );
        let first = engine.allocate(&request("Tokyo")).unwrap();
        let second = engine.allocate(&request("Tokyo")).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.cached_entries(), 1);
    }
}
