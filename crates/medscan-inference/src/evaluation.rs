//! Accuracy of a pipeline over labeled samples.

use medscan_core::errors::MedscanResult;
use medscan_core::models::ImageTensor;
use serde::Serialize;

use crate::pipeline::{ClassificationPipeline, ClassifyRequest};

/// A tensor with the condition id it is known to show.
#[derive(Debug, Clone)]
pub struct LabeledSample {
    pub tensor: ImageTensor,
    pub expected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
    /// Mean confidence of the top result.
    pub average_confidence: f64,
}

/// Classify every sample and compare the top result with its label.
/// The first failing classification aborts the run.
pub fn evaluate(
    pipeline: &ClassificationPipeline,
    samples: &[LabeledSample],
    request: &ClassifyRequest,
) -> MedscanResult<EvaluationReport> {
    if samples.is_empty() {
        return Ok(EvaluationReport::default());
    }
    let mut correct = 0;
    let mut confidence_sum = 0.0;
    for sample in samples {
        let classification = pipeline.classify(&sample.tensor, request)?;
        if let Some(top) = classification.results.first() {
            confidence_sum += top.confidence;
            if top.id() == sample.expected {
                correct += 1;
            }
        }
    }
    let total = samples.len();
    tracing::info!(correct, total, "evaluation finished");
    Ok(EvaluationReport {
        accuracy: correct as f64 / total as f64,
        correct,
        total,
        average_confidence: confidence_sum / total as f64,
    })
}
