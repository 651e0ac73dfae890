use crate::errors::MedscanResult;
use crate::models::ImageTensor;

/// Turns raw image bytes into a model-ready tensor.
pub trait IImageCodec: Send + Sync {
    /// Decode, resize, and normalize according to `preprocessing`.
    fn decode(&self, bytes: &[u8], preprocessing: &str) -> MedscanResult<ImageTensor>;
}
