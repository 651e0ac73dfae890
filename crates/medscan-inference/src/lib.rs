//! # medscan-inference
//!
//! Turns registry records into runnable predictors and runs classification.
//!
//! - [`ModelRegistry`]: the shared registry + predictor cache, one per process.
//! - [`ClassificationPipeline`]: tensor or bytes in, ordered condition results out.
//! - [`BinaryReducer`]: collapses multiclass results to normal / infected.
//! - [`response`]: the single boundary that turns errors into fallback documents.

pub mod binary;
pub mod cache;
pub mod ensemble;
pub mod evaluation;
pub mod pipeline;
pub mod recommendation;
pub mod registry;
pub mod response;
pub mod single;

pub use binary::BinaryReducer;
pub use cache::{CacheKey, PredictorCache};
pub use ensemble::EnsembleCombiner;
pub use evaluation::{evaluate, EvaluationReport, LabeledSample};
pub use pipeline::{ClassificationPipeline, ClassifyRequest};
pub use registry::ModelRegistry;
pub use single::SingleModelPredictor;
