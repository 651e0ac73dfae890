//! RegistryStore: the in-memory registry backed by a JSON document on disk.
//!
//! Every mutation works on a copy of the document, validates it, persists it,
//! and only then swaps it in. A failed mutation changes neither memory nor disk.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use medscan_core::constants::ENSEMBLE_ARCHITECTURE;
use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::{CategoryRegistry, ModelRecord, RegistryDocument, RegistrySnapshot};
use medscan_observability::events;
use tracing::instrument;

use crate::bootstrap::default_document;
use crate::ensemble;
use crate::persistence::{self, LoadOutcome};

pub struct RegistryStore {
    path: PathBuf,
    document: RwLock<RegistryDocument>,
}

impl RegistryStore {
    /// Load the registry at `path`.
    ///
    /// A missing, unreadable, malformed, or structurally invalid document is
    /// replaced by the default registry, which is persisted immediately.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> MedscanResult<Self> {
        let path = path.as_ref().to_path_buf();
        let document = match persistence::load_document(&path) {
            LoadOutcome::Loaded(doc) => doc,
            LoadOutcome::Missing => Self::bootstrap(&path, "registry file not found")?,
            LoadOutcome::Unusable(reason) => Self::bootstrap(&path, &reason)?,
        };
        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    fn bootstrap(path: &Path, reason: &str) -> MedscanResult<RegistryDocument> {
        events::registry_bootstrapped(&path.display().to_string(), reason);
        let doc = default_document(Utc::now());
        persistence::save_document(path, &doc)?;
        Ok(doc)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryDocument> {
        self.document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryDocument> {
        self.document
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the whole document.
    pub fn document(&self) -> RegistryDocument {
        self.read().clone()
    }

    pub fn category(&self, category: &str) -> Option<CategoryRegistry> {
        self.read().category(category).cloned()
    }

    pub fn record(&self, category: &str, version: &str) -> Option<ModelRecord> {
        self.read().record(category, version).cloned()
    }

    /// The category's default version and its record.
    pub fn default_record(&self, category: &str) -> MedscanResult<(String, ModelRecord)> {
        let doc = self.read();
        let registry = doc
            .category(category)
            .ok_or_else(|| MedscanError::UnsupportedCategory {
                category: category.to_string(),
            })?;
        let record = registry
            .get(&registry.default_version)
            .cloned()
            .ok_or_else(|| MedscanError::VersionNotFound {
                category: category.to_string(),
                version: registry.default_version.clone(),
            })?;
        Ok((registry.default_version.clone(), record))
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot::from(&*self.read())
    }

    /// Rewrite the current document to disk.
    pub fn save(&self) -> MedscanResult<()> {
        let doc = self.write();
        persistence::save_document(&self.path, &doc)
    }

    /// Apply `mutate` to a copy, validate, persist, then publish the copy.
    ///
    /// The write guard is held throughout so concurrent mutations serialize.
    fn commit<T>(
        &self,
        category: &str,
        mutate: impl FnOnce(&mut RegistryDocument) -> MedscanResult<T>,
    ) -> MedscanResult<T> {
        let mut guard = self.write();
        let mut next = guard.clone();
        let out = mutate(&mut next)?;
        next.validate()
            .map_err(|reason| MedscanError::EnsembleConfig {
                category: category.to_string(),
                reason,
            })?;
        persistence::save_document(&self.path, &next)?;
        *guard = next;
        Ok(out)
    }

    /// Add or replace a version, creating the category if absent. The first
    /// version of a new category always becomes its default.
    ///
    /// A Single record may not use the `ensemble` architecture tag, which the
    /// stored document reserves for ensembles.
    #[instrument(skip(self, record))]
    pub fn register_version(
        &self,
        category: &str,
        version: &str,
        record: ModelRecord,
        is_default: bool,
    ) -> MedscanResult<()> {
        if let ModelRecord::Single(single) = &record {
            if single.architecture == ENSEMBLE_ARCHITECTURE {
                return Err(MedscanError::EnsembleConfig {
                    category: category.to_string(),
                    reason: format!(
                        "single version {version} uses the reserved architecture {ENSEMBLE_ARCHITECTURE}"
                    ),
                });
            }
        }
        self.commit(category, |doc| {
            let record = match record {
                ModelRecord::Ensemble(e) => {
                    let registry = doc.category(category).ok_or_else(|| {
                        MedscanError::EnsembleConfig {
                            category: category.to_string(),
                            reason: "ensemble members must be registered first".to_string(),
                        }
                    })?;
                    ModelRecord::Ensemble(ensemble::build_record(
                        category,
                        registry,
                        version,
                        &e.members,
                        Some(&e.weights),
                    )?)
                }
                single => single,
            };
            match doc.category_mut(category) {
                Some(registry) => {
                    registry.versions.insert(version.to_string(), record);
                    if is_default {
                        registry.default_version = version.to_string();
                    }
                }
                None => {
                    doc.categories.insert(
                        category.to_string(),
                        CategoryRegistry::with_default(version, record),
                    );
                }
            }
            Ok(())
        })?;
        events::registry_mutated("register_version", category, version);
        Ok(())
    }

    /// Point the category's default at an existing version.
    #[instrument(skip(self))]
    pub fn set_default(&self, category: &str, version: &str) -> MedscanResult<()> {
        self.commit(category, |doc| {
            let registry =
                doc.category_mut(category)
                    .ok_or_else(|| MedscanError::UnsupportedCategory {
                        category: category.to_string(),
                    })?;
            if !registry.contains(version) {
                return Err(MedscanError::VersionNotFound {
                    category: category.to_string(),
                    version: version.to_string(),
                });
            }
            registry.default_version = version.to_string();
            Ok(())
        })?;
        events::registry_mutated("set_default", category, version);
        Ok(())
    }

    /// Register an ensemble of existing Single versions under `ensemble_id`.
    ///
    /// An unknown category or member is an ensemble configuration error.
    /// Weights default to uniform and are normalized to sum to 1.0.
    #[instrument(skip(self, weights))]
    pub fn create_ensemble(
        &self,
        category: &str,
        ensemble_id: &str,
        members: &[String],
        weights: Option<&[f64]>,
    ) -> MedscanResult<ModelRecord> {
        let record = self.commit(category, |doc| {
            let registry =
                doc.category_mut(category)
                    .ok_or_else(|| MedscanError::EnsembleConfig {
                        category: category.to_string(),
                        reason: format!("unknown category {category}"),
                    })?;
            let record = ModelRecord::Ensemble(ensemble::build_record(
                category,
                registry,
                ensemble_id,
                members,
                weights,
            )?);
            registry
                .versions
                .insert(ensemble_id.to_string(), record.clone());
            Ok(record)
        })?;
        events::registry_mutated("create_ensemble", category, ensemble_id);
        Ok(record)
    }
}

impl std::fmt::Debug for RegistryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
