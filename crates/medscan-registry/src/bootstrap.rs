//! The registry synthesized on first start or when the stored one is unusable.

use chrono::{DateTime, Utc};
use medscan_core::catalog::CATEGORIES;
use medscan_core::constants::{BASELINE_ARCHITECTURE, BASELINE_VERSION, STANDARD_PREPROCESSING};
use medscan_core::models::{CategoryRegistry, ModelRecord, RegistryDocument, SingleRecord};

/// Storage locator of a category's baseline model.
pub fn baseline_locator(category: &str) -> String {
    format!("{category}_model_{BASELINE_ARCHITECTURE}_{BASELINE_VERSION}")
}

/// One baseline Single version per catalog category, set as the default.
///
/// Everything but `created_at` is fixed, so fresh installs behave the same.
pub fn default_document(created_at: DateTime<Utc>) -> RegistryDocument {
    let categories = CATEGORIES
        .iter()
        .map(|category| {
            let record = ModelRecord::Single(SingleRecord {
                architecture: BASELINE_ARCHITECTURE.to_string(),
                path: baseline_locator(category),
                preprocessing: STANDARD_PREPROCESSING.to_string(),
                created_at,
            });
            (
                category.to_string(),
                CategoryRegistry::with_default(BASELINE_VERSION, record),
            )
        })
        .collect();
    RegistryDocument { categories }
}
