//! Collapse multiclass results into a single normal / infected verdict.

use medscan_core::catalog::binary;
use medscan_core::models::ClassificationResult;

use crate::recommendation::recommendation_text;

pub struct BinaryReducer;

impl BinaryReducer {
    /// Always yields exactly one result.
    ///
    /// Infected when any result exceeds `infection_threshold`, or a serious
    /// one does. Infected carries the top confidence; normal its complement.
    pub fn reduce(results: &[ClassificationResult], infection_threshold: f64) -> Vec<ClassificationResult> {
        let max_confidence = results
            .iter()
            .map(|r| r.confidence)
            .fold(0.0_f64, f64::max);
        let has_serious = results
            .iter()
            .any(|r| r.is_potentially_serious() && r.confidence > infection_threshold);
        let is_infected = has_serious || max_confidence > infection_threshold;

        let (label, confidence) = if is_infected {
            (binary::infected(), max_confidence)
        } else {
            (binary::normal(), 1.0 - max_confidence)
        };
        vec![ClassificationResult {
            label: label.clone(),
            confidence,
            recommendation_text: recommendation_text(&label.name, confidence),
            recommend_consultation: label.is_potentially_serious,
            catalog_index: None,
        }]
    }
}
