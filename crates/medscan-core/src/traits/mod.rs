mod backend;
mod codec;
mod predictor;

pub use backend::{ILoadedModel, IModelBackend};
pub use codec::IImageCodec;
pub use predictor::{IPredictor, PredictorKind};
