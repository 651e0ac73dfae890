use serde::{Deserialize, Serialize};

use super::SaliencyMap;
use crate::catalog::ConditionLabel;
use crate::traits::PredictorKind;

/// A catalog label joined with a score and the derived guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// The label, with `treatment_info` always filled.
    #[serde(flatten)]
    pub label: ConditionLabel,
    pub confidence: f64,
    pub recommendation_text: String,
    pub recommend_consultation: bool,
    /// Position in the category catalog; `None` for binary labels.
    #[serde(skip)]
    pub catalog_index: Option<usize>,
}

impl ClassificationResult {
    pub fn id(&self) -> &str {
        &self.label.id
    }

    pub fn is_potentially_serious(&self) -> bool {
        self.label.is_potentially_serious
    }
}

/// Whether results are per-condition or collapsed to normal/abnormal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationMode {
    Multiclass,
    Binary,
}

impl ClassificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multiclass => "multiclass",
            Self::Binary => "binary",
        }
    }
}

/// Output of one classification call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub results: Vec<ClassificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention: Option<SaliencyMap>,
    pub category: String,
    /// The version id the request resolved to.
    pub model_version: String,
    pub predictor_kind: PredictorKind,
    pub mode: ClassificationMode,
}
