mod classification;
mod model_record;
mod registry_document;
mod snapshot;
mod tensor;

pub use classification::{Classification, ClassificationMode, ClassificationResult};
pub use model_record::{EnsembleRecord, ModelRecord, SingleRecord};
pub use registry_document::{CategoryRegistry, RegistryDocument};
pub use snapshot::{CategorySnapshot, RegistrySnapshot};
pub use tensor::{ImageTensor, SaliencyMap};
