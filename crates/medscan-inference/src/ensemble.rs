//! Weighted combination of member predictors.

use std::sync::Arc;

use medscan_core::errors::{MedscanError, MedscanResult};
use medscan_core::models::ImageTensor;
use medscan_core::traits::{IPredictor, PredictorKind};

/// One member of an ensemble.
pub struct EnsembleMember {
    pub version: String,
    pub predictor: Arc<dyn IPredictor>,
    pub weight: f64,
}

/// Sums member score vectors scaled by their stored weights.
///
/// Weights are used as stored and the sum is not renormalized. Ensembles
/// never produce attention maps.
pub struct EnsembleCombiner {
    members: Vec<EnsembleMember>,
}

impl EnsembleCombiner {
    pub fn new(members: Vec<EnsembleMember>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[EnsembleMember] {
        &self.members
    }
}

impl IPredictor for EnsembleCombiner {
    fn predict(&self, tensor: &ImageTensor) -> MedscanResult<Vec<f32>> {
        let mut combined: Option<Vec<f64>> = None;
        for member in &self.members {
            let scores = member.predictor.predict(tensor)?;
            let sum = combined.get_or_insert_with(|| vec![0.0; scores.len()]);
            if scores.len() != sum.len() {
                return Err(MedscanError::ShapeMismatch {
                    expected: sum.len(),
                    actual: scores.len(),
                    member: member.version.clone(),
                });
            }
            for (acc, score) in sum.iter_mut().zip(&scores) {
                *acc += member.weight * f64::from(*score);
            }
        }
        Ok(combined
            .unwrap_or_default()
            .into_iter()
            .map(|v| v as f32)
            .collect())
    }

    fn kind(&self) -> PredictorKind {
        PredictorKind::Ensemble
    }
}
