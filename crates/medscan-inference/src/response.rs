//! The request boundary: the one place where a failed classification is
//! turned into a displayable document instead of an error.

use medscan_core::catalog;
use medscan_core::constants::FALLBACK_TOP_K;
use medscan_core::errors::MedscanResult;
use medscan_core::models::{Classification, ClassificationMode, ClassificationResult, SaliencyMap};
use medscan_observability::events;
use serde::Serialize;

/// `modelVersion` reported when the results are a fallback.
pub const FALLBACK_VERSION: &str = "error_fallback";
pub const FALLBACK_NOTE: &str = "This is a fallback result due to an error";

/// A catalog entry shown with a fixed, conservative confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackResult {
    pub id: String,
    pub name: String,
    pub confidence: f64,
    pub description: String,
    pub error_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseResult {
    Classified(ClassificationResult),
    Fallback(FallbackResult),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub results: Vec<ResponseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention: Option<SaliencyMap>,
    pub model_type: String,
    pub model_version: String,
    pub classification_mode: ClassificationMode,
}

impl ResponseDocument {
    /// Build the document for a classification outcome. Never fails.
    pub fn from_outcome(
        outcome: MedscanResult<Classification>,
        category: &str,
        mode: ClassificationMode,
    ) -> Self {
        match outcome {
            Ok(classification) => Self {
                error: None,
                results: classification
                    .results
                    .into_iter()
                    .map(ResponseResult::Classified)
                    .collect(),
                attention: classification.attention,
                model_type: classification.category,
                model_version: classification.model_version,
                classification_mode: classification.mode,
            },
            Err(e) => {
                events::boundary_fallback(category, e.kind(), &e.to_string());
                Self {
                    error: Some(e.to_string()),
                    results: fallback_results(category)
                        .into_iter()
                        .map(ResponseResult::Fallback)
                        .collect(),
                    attention: None,
                    model_type: category.to_string(),
                    model_version: FALLBACK_VERSION.to_string(),
                    classification_mode: mode,
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// The first catalog entries at 0.75, 0.65, ... Empty for unknown categories.
pub fn fallback_results(category: &str) -> Vec<FallbackResult> {
    let Some(labels) = catalog::for_category(category) else {
        return Vec::new();
    };
    labels
        .iter()
        .take(FALLBACK_TOP_K)
        .enumerate()
        .map(|(i, label)| FallbackResult {
            id: label.id.clone(),
            name: label.name.clone(),
            confidence: 0.75 - 0.1 * i as f64,
            description: label.description.clone(),
            error_note: FALLBACK_NOTE.to_string(),
        })
        .collect()
}
