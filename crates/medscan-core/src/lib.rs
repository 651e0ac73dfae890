//! # medscan-core
//!
//! Foundation crate for the medscan image classifier.
//! Defines the condition catalogs, registry data model, collaborator traits,
//! errors, config, and constants. Every other crate in the workspace depends on this.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use catalog::ConditionLabel;
pub use config::MedscanConfig;
pub use errors::{MedscanError, MedscanResult, PersistenceError};
pub use models::{ImageTensor, ModelRecord, SaliencyMap};
