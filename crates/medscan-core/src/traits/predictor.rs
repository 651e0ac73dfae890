use serde::{Deserialize, Serialize};

use crate::errors::MedscanResult;
use crate::models::{ImageTensor, SaliencyMap};

/// Which kind of record a predictor was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorKind {
    Single,
    Ensemble,
}

/// A live, cached predictor: either one loaded model or an ensemble of them.
pub trait IPredictor: Send + Sync {
    /// Produce one score per catalog label.
    fn predict(&self, tensor: &ImageTensor) -> MedscanResult<Vec<f32>>;

    /// Saliency for the top prediction, when the predictor supports it.
    fn attention(&self, _tensor: &ImageTensor) -> MedscanResult<Option<SaliencyMap>> {
        Ok(None)
    }

    fn kind(&self) -> PredictorKind;
}
