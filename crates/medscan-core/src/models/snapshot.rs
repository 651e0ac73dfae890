use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ModelRecord, RegistryDocument};

/// Read-only listing of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub default_version: String,
    pub versions: Vec<String>,
    pub details: BTreeMap<String, ModelRecord>,
}

/// Read-only projection of the whole registry for listing tools.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrySnapshot {
    pub categories: BTreeMap<String, CategorySnapshot>,
}

impl From<&RegistryDocument> for RegistrySnapshot {
    fn from(doc: &RegistryDocument) -> Self {
        let categories = doc
            .categories
            .iter()
            .map(|(name, cat)| {
                (
                    name.clone(),
                    CategorySnapshot {
                        default_version: cat.default_version.clone(),
                        versions: cat.version_ids(),
                        details: cat.versions.clone(),
                    },
                )
            })
            .collect();
        Self { categories }
    }
}
