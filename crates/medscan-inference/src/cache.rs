//! Predictor cache keyed by (category, version, generation).
//!
//! The generation is a per-category counter the owner advances on every
//! mutation, so a predictor built from a superseded record lands under a key
//! no later lookup asks for. Backed by moka: concurrent first access to one key runs the constructor
//! once while late arrivals wait for its result. Failed constructions are
//! not cached.

use std::fmt;
use std::sync::Arc;

use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::traits::IPredictor;
use moka::sync::Cache;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: String,
    pub version: String,
    pub generation: u64,
}

impl CacheKey {
    /// Key at generation 0, the state of a category never mutated.
    pub fn new(category: impl Into<String>, version: impl Into<String>) -> Self {
        Self::at(category, version, 0)
    }

    pub fn at(category: impl Into<String>, version: impl Into<String>, generation: u64) -> Self {
        Self {
            category: category.into(),
            version: version.into(),
            generation,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.category, self.version, self.generation)
    }
}

pub struct PredictorCache {
    cache: Cache<CacheKey, Arc<dyn IPredictor>>,
}

impl PredictorCache {
    /// Unbounded: entries leave only through invalidation.
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<dyn IPredictor>> {
        self.cache.get(key)
    }

    /// Return the cached predictor or run `construct` for it, at most once
    /// across concurrent callers.
    pub fn get_or_construct(
        &self,
        key: CacheKey,
        construct: impl FnOnce() -> MedscanResult<Arc<dyn IPredictor>>,
    ) -> MedscanResult<Arc<dyn IPredictor>> {
        self.cache
            .try_get_with(key, construct)
            .map_err(|shared: Arc<MedscanError>| (*shared).clone())
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.cache.contains_key(key)
    }

    /// Drop every entry of `category`, whatever its generation. Returns how
    /// many were dropped.
    pub fn invalidate(&self, category: &str) -> usize {
        let keys: Vec<CacheKey> = self
            .cache
            .iter()
            .filter(|(key, _)| key.category == category)
            .map(|(key, _)| (*key).clone())
            .collect();
        for key in &keys {
            self.cache.invalidate(key);
        }
        keys.len()
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Number of entries currently in the cache.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PredictorCache {
    fn default() -> Self {
        Self::new()
    }
}
