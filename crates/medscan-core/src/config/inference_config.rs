use serde::{Deserialize, Serialize};

use super::defaults;

/// Classification pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Per-label inclusion threshold (strictly greater than).
    pub confidence_threshold: f64,
    /// Threshold used by the binary normal/abnormal reduction.
    pub infection_threshold: f64,
    /// Upper bound for deadline-bounded classification (milliseconds).
    pub construction_timeout_ms: u64,
    /// Preprocessing profile when a record does not name one.
    pub default_preprocessing: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::DEFAULT_CONFIDENCE_THRESHOLD,
            infection_threshold: defaults::DEFAULT_INFECTION_THRESHOLD,
            construction_timeout_ms: defaults::DEFAULT_CONSTRUCTION_TIMEOUT_MS,
            default_preprocessing: defaults::DEFAULT_PREPROCESSING.to_string(),
        }
    }
}
