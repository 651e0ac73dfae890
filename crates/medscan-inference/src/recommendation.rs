//! Confidence banding and the texts derived from it.

use medscan_core::constants::{HIGH_CONFIDENCE_BAND, MODERATE_CONFIDENCE_BAND};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    High,
    Moderate,
    Low,
}

impl ConfidenceBand {
    /// Bands are exclusive at their lower bound: 0.7 is Moderate, 0.5 is Low.
    pub fn of(confidence: f64) -> Self {
        if confidence > HIGH_CONFIDENCE_BAND {
            Self::High
        } else if confidence > MODERATE_CONFIDENCE_BAND {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

pub fn recommendation_text(name: &str, confidence: f64) -> String {
    match ConfidenceBand::of(confidence) {
        ConfidenceBand::High => format!("High confidence prediction for {name}."),
        ConfidenceBand::Moderate => format!("Moderate confidence prediction for {name}."),
        ConfidenceBand::Low => format!("Low confidence prediction for {name}."),
    }
}

/// Serious conditions warrant a consultation unless confidence is low.
pub fn recommend_consultation(is_potentially_serious: bool, confidence: f64) -> bool {
    is_potentially_serious && ConfidenceBand::of(confidence) != ConfidenceBand::Low
}

pub fn default_treatment(is_potentially_serious: bool) -> &'static str {
    if is_potentially_serious {
        "Please consult a healthcare professional for treatment options."
    } else {
        "Consider symptom management and consult a healthcare professional if symptoms worsen."
    }
}
