//! ModelRegistry: the registry store, predictor cache, and model backend
//! behind one handle.
//!
//! Construct it once at startup and share it by `Arc`. Mutations run
//! read-modify-persist-invalidate under a single lock; lookups of cached
//! predictors take no lock beyond the cache's own.
//!
//! Each mutation advances the category's generation before dropping its
//! cached predictors. Lookups key the cache by the generation they observed,
//! so a construction that read the record before the mutation can only
//! populate a key that is already out of date.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use dashmap::DashMap;
use medscan_core::catalog;
use medscan_core::config::RegistryConfig;
use medscan_core::constants::{
    ENSEMBLE_ARCHITECTURE, ENSEMBLE_VERSION_ALIAS, MODEL_TYPE_ENSEMBLE, STANDARD_PREPROCESSING,
};
use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::{ModelRecord, RegistrySnapshot};
use medscan_core::traits::{ILoadedModel, IModelBackend, IPredictor};
use medscan_observability::{construction_span, events, registry_span};
use medscan_registry::RegistryStore;

use crate::cache::{CacheKey, PredictorCache};
use crate::ensemble::{EnsembleCombiner, EnsembleMember};
use crate::single::SingleModelPredictor;

pub struct ModelRegistry {
    store: RegistryStore,
    cache: PredictorCache,
    backend: Arc<dyn IModelBackend>,
    models_dir: String,
    mutation: Mutex<()>,
    generations: DashMap<String, u64>,
}

impl ModelRegistry {
    /// Open the registry file named in `config`, bootstrapping defaults if needed.
    pub fn open(config: &RegistryConfig, backend: Arc<dyn IModelBackend>) -> MedscanResult<Self> {
        let store = RegistryStore::open(&config.path)?;
        tracing::info!(
            path = %config.path,
            backend = backend.name(),
            "model registry opened"
        );
        Ok(Self {
            store,
            cache: PredictorCache::new(),
            backend,
            models_dir: config.models_dir.clone(),
            mutation: Mutex::new(()),
            generations: DashMap::new(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.mutation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    pub fn cache(&self) -> &PredictorCache {
        &self.cache
    }

    /// The effective version id for a request.
    ///
    /// `model_type == "ensemble"` selects the version named `ensemble` and
    /// ignores `version`. Otherwise an explicit version must exist, and an
    /// absent one means the category default.
    pub fn resolve(
        &self,
        category: &str,
        version: Option<&str>,
        model_type: Option<&str>,
    ) -> MedscanResult<String> {
        let registry =
            self.store
                .category(category)
                .ok_or_else(|| MedscanError::UnsupportedCategory {
                    category: category.to_string(),
                })?;
        let wanted = if model_type == Some(MODEL_TYPE_ENSEMBLE) {
            ENSEMBLE_VERSION_ALIAS
        } else {
            match version {
                Some(v) => v,
                None => return Ok(registry.default_version),
            }
        };
        if !registry.contains(wanted) {
            return Err(MedscanError::VersionNotFound {
                category: category.to_string(),
                version: wanted.to_string(),
            });
        }
        Ok(wanted.to_string())
    }

    /// Cache key for `category`/`version` at the category's current generation.
    pub fn cache_key(&self, category: &str, version: &str) -> CacheKey {
        let generation = self.generations.get(category).map_or(0, |g| *g);
        CacheKey::at(category, version, generation)
    }

    /// The predictor for `category`/`version`, constructed on first use.
    pub fn get(&self, category: &str, version: &str) -> MedscanResult<Arc<dyn IPredictor>> {
        let key = self.cache_key(category, version);
        if let Some(hit) = self.cache.get(&key) {
            events::predictor_cache_hit(category, version);
            return Ok(hit);
        }
        self.cache
            .get_or_construct(key, || self.construct(category, version))
    }

    fn construct(&self, category: &str, version: &str) -> MedscanResult<Arc<dyn IPredictor>> {
        let _span = construction_span!(category, version).entered();
        let started = Instant::now();

        let labels = catalog::for_category(category).ok_or_else(|| {
            MedscanError::UnsupportedCategory {
                category: category.to_string(),
            }
        })?;
        let registry =
            self.store
                .category(category)
                .ok_or_else(|| MedscanError::UnsupportedCategory {
                    category: category.to_string(),
                })?;
        let record = registry
            .get(version)
            .ok_or_else(|| MedscanError::VersionNotFound {
                category: category.to_string(),
                version: version.to_string(),
            })?;

        let predictor: Arc<dyn IPredictor> = match record {
            ModelRecord::Single(single) => Arc::new(SingleModelPredictor::materialize(
                self.backend.as_ref(),
                category,
                version,
                single,
                labels.len(),
            )?),
            ModelRecord::Ensemble(ensemble) => {
                let members = ensemble
                    .members
                    .iter()
                    .zip(&ensemble.weights)
                    .map(|(member, weight)| {
                        Ok(EnsembleMember {
                            version: member.clone(),
                            predictor: self.get(category, member)?,
                            weight: *weight,
                        })
                    })
                    .collect::<MedscanResult<Vec<_>>>()?;
                Arc::new(EnsembleCombiner::new(members))
            }
        };

        let kind = if record.is_ensemble() { "ensemble" } else { "single" };
        events::predictor_constructed(
            category,
            version,
            kind,
            started.elapsed().as_millis() as u64,
        );
        Ok(predictor)
    }

    /// Add or replace a version and drop the category's cached predictors.
    pub fn register_version(
        &self,
        category: &str,
        version: &str,
        record: ModelRecord,
        is_default: bool,
    ) -> MedscanResult<()> {
        let _span = registry_span!("register_version", category).entered();
        let _guard = self.lock();
        self.store
            .register_version(category, version, record, is_default)?;
        self.invalidate(category);
        Ok(())
    }

    pub fn set_default(&self, category: &str, version: &str) -> MedscanResult<()> {
        let _span = registry_span!("set_default", category).entered();
        let _guard = self.lock();
        self.store.set_default(category, version)
    }

    /// Register an ensemble of existing Single versions. An ensemble replacing
    /// an existing id drops the category's cached predictors.
    pub fn create_ensemble(
        &self,
        category: &str,
        ensemble_id: &str,
        members: &[String],
        weights: Option<&[f64]>,
    ) -> MedscanResult<ModelRecord> {
        let _span = registry_span!("create_ensemble", category).entered();
        let _guard = self.lock();
        let record = self
            .store
            .create_ensemble(category, ensemble_id, members, weights)?;
        self.invalidate(category);
        Ok(record)
    }

    /// Store an externally trained model and register it as a Single version.
    /// The category is created if absent, though only catalogued categories
    /// can be classified.
    ///
    /// The locator is `{models_dir}/{category}_model_{architecture}_{version}`.
    pub fn register_custom_model(
        &self,
        category: &str,
        model: &dyn ILoadedModel,
        version: &str,
        architecture: &str,
        is_default: bool,
    ) -> MedscanResult<ModelRecord> {
        if architecture == ENSEMBLE_ARCHITECTURE {
            return Err(MedscanError::EnsembleConfig {
                category: category.to_string(),
                reason: format!(
                    "custom model {version} uses the reserved architecture {ENSEMBLE_ARCHITECTURE}"
                ),
            });
        }
        let locator = custom_model_locator(&self.models_dir, category, architecture, version);
        self.backend.save(model, &locator)?;
        events::model_materialized(category, architecture, &locator);

        let record = ModelRecord::single(architecture, locator, STANDARD_PREPROCESSING);
        self.register_version(category, version, record.clone(), is_default)?;
        Ok(record)
    }

    /// Preprocessing profile for a registered version.
    pub fn preprocessing_for(&self, category: &str, version: &str) -> MedscanResult<String> {
        if self.store.category(category).is_none() {
            return Err(MedscanError::UnsupportedCategory {
                category: category.to_string(),
            });
        }
        self.store
            .record(category, version)
            .map(|record| record.preprocessing().to_string())
            .ok_or_else(|| MedscanError::VersionNotFound {
                category: category.to_string(),
                version: version.to_string(),
            })
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.store.snapshot()
    }

    /// Advance the category's generation and drop its cached predictors.
    pub fn invalidate(&self, category: &str) -> usize {
        *self.generations.entry(category.to_string()).or_insert(0) += 1;
        let dropped = self.cache.invalidate(category);
        events::cache_invalidated(category, dropped);
        dropped
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Re-persist the current registry. Call on shutdown.
    pub fn flush(&self) -> MedscanResult<()> {
        let _guard = self.lock();
        self.store.save()
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("store", &self.store)
            .field("backend", &self.backend.name())
            .field("models_dir", &self.models_dir)
            .finish_non_exhaustive()
    }
}

fn custom_model_locator(models_dir: &str, category: &str, architecture: &str, version: &str) -> String {
    Path::new(models_dir)
        .join(format!("{category}_model_{architecture}_{version}"))
        .to_string_lossy()
        .into_owned()
}
