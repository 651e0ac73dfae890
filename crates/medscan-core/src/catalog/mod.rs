//! Condition catalogs.
//!
//! Each category has a fixed, ordered list of labels. A label's index is the
//! index of its score in the model's output vector, so the order here must
//! match the order the models were trained with.

pub mod binary;
mod ear;
mod throat;

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// A diagnosable condition within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionLabel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub symptoms: Vec<String>,
    pub is_potentially_serious: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_info: Option<String>,
}

impl ConditionLabel {
    pub(crate) fn new(
        id: &str,
        name: &str,
        description: &str,
        symptoms: &[&str],
        is_potentially_serious: bool,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            is_potentially_serious,
            treatment_info: None,
        }
    }

    pub(crate) fn with_treatment(mut self, treatment: &str) -> Self {
        self.treatment_info = Some(treatment.to_string());
        self
    }
}

pub const THROAT: &str = "throat";
pub const EAR: &str = "ear";

/// Categories that ship with a catalog.
pub const CATEGORIES: [&str; 2] = [THROAT, EAR];

static THROAT_CATALOG: LazyLock<Vec<ConditionLabel>> = LazyLock::new(throat::conditions);
static EAR_CATALOG: LazyLock<Vec<ConditionLabel>> = LazyLock::new(ear::conditions);

/// The ordered catalog for a category, if one exists.
pub fn for_category(category: &str) -> Option<&'static [ConditionLabel]> {
    match category {
        THROAT => Some(THROAT_CATALOG.as_slice()),
        EAR => Some(EAR_CATALOG.as_slice()),
        _ => None,
    }
}

/// Whether a category has a catalog.
pub fn is_supported(category: &str) -> bool {
    for_category(category).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_labels() {
        for category in CATEGORIES {
            let labels = for_category(category).unwrap();
            assert_eq!(labels.len(), 5, "{category}");
        }
    }

    #[test]
    fn label_ids_unique_within_category() {
        for category in CATEGORIES {
            let labels = for_category(category).unwrap();
            let mut ids: Vec<&str> = labels.iter().map(|l| l.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), labels.len());
        }
    }

    #[test]
    fn unknown_category_has_no_catalog() {
        assert!(for_category("nose").is_none());
        assert!(!is_supported("nose"));
    }

    #[test]
    fn serializes_camel_case_and_skips_missing_treatment() {
        let label = &for_category(THROAT).unwrap()[0];
        let json = serde_json::to_value(label).unwrap();
        assert_eq!(json["isPotentiallySerious"], true);
        assert!(json.get("treatmentInfo").is_none());
    }
}
