use crate::errors::MedscanResult;
use crate::models::{ImageTensor, SaliencyMap};

/// A trained model as handed out by the backend.
pub trait ILoadedModel: Send + Sync {
    fn predict(&self, tensor: &ImageTensor) -> MedscanResult<Vec<f32>>;

    /// Saliency over the input. Backends without the capability return `None`.
    fn attention(&self, _tensor: &ImageTensor) -> MedscanResult<Option<SaliencyMap>> {
        Ok(None)
    }
}

/// Loads, builds, and stores model artifacts. The storage locator is opaque
/// to everything but the backend.
pub trait IModelBackend: Send + Sync {
    /// Load a stored model. `Ok(None)` means nothing is stored at `locator`.
    fn load(&self, locator: &str) -> MedscanResult<Option<Box<dyn ILoadedModel>>>;

    /// Build a fresh, untrained model for `architecture` with `num_classes` outputs.
    fn build(&self, architecture: &str, num_classes: usize) -> MedscanResult<Box<dyn ILoadedModel>>;

    /// Store a model at `locator`.
    fn save(&self, model: &dyn ILoadedModel, locator: &str) -> MedscanResult<()>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
