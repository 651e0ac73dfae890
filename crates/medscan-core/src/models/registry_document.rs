use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ModelRecord;
use crate::constants::WEIGHT_SUM_TOLERANCE;

/// All versions of one category plus its default pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRegistry {
    pub versions: BTreeMap<String, ModelRecord>,
    pub default_version: String,
}

impl CategoryRegistry {
    /// A category holding exactly one version, which is also the default.
    pub fn with_default(version: impl Into<String>, record: ModelRecord) -> Self {
        let version = version.into();
        let mut versions = BTreeMap::new();
        versions.insert(version.clone(), record);
        Self {
            versions,
            default_version: version,
        }
    }

    pub fn get(&self, version: &str) -> Option<&ModelRecord> {
        self.versions.get(version)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    pub fn version_ids(&self) -> Vec<String> {
        self.versions.keys().cloned().collect()
    }

    /// Check the structural invariants: the default resolves, and every
    /// ensemble lists existing Single members with normalized weights.
    pub fn validate(&self) -> Result<(), String> {
        if !self.versions.contains_key(&self.default_version) {
            return Err(format!(
                "default version {} is not registered",
                self.default_version
            ));
        }
        for (id, record) in &self.versions {
            let ModelRecord::Ensemble(ensemble) = record else {
                continue;
            };
            if ensemble.members.is_empty() {
                return Err(format!("ensemble {id} has no members"));
            }
            if ensemble.members.len() != ensemble.weights.len() {
                return Err(format!("ensemble {id} has mismatched weights"));
            }
            for member in &ensemble.members {
                match self.versions.get(member) {
                    Some(ModelRecord::Single(_)) => {}
                    Some(ModelRecord::Ensemble(_)) => {
                        return Err(format!("ensemble {id} nests ensemble {member}"));
                    }
                    None => return Err(format!("ensemble {id} references unknown {member}")),
                }
            }
            let sum: f64 = ensemble.weights.iter().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(format!("ensemble {id} weights sum to {sum}"));
            }
        }
        Ok(())
    }
}

/// The persisted registry: category name to category registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryDocument {
    pub categories: BTreeMap<String, CategoryRegistry>,
}

impl RegistryDocument {
    pub fn category(&self, category: &str) -> Option<&CategoryRegistry> {
        self.categories.get(category)
    }

    pub fn category_mut(&mut self, category: &str) -> Option<&mut CategoryRegistry> {
        self.categories.get_mut(category)
    }

    pub fn record(&self, category: &str, version: &str) -> Option<&ModelRecord> {
        self.categories.get(category)?.get(version)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, category) in &self.categories {
            category
                .validate()
                .map_err(|reason| format!("category {name}: {reason}"))?;
        }
        Ok(())
    }
}
