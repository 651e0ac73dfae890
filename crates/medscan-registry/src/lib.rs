//! # medscan-registry
//!
//! The persistent registry of model versions per category.
//!
//! ## Guarantees
//!
//! | Guarantee | How |
//! |-----------|-----|
//! | Readers never see a half-written file | staging file in the same directory, then atomic rename |
//! | Failed mutations leave the file untouched | validate first, write second |
//! | Default version always resolves | checked on load and after every mutation |
//! | No ensemble of ensembles | rejected when the ensemble is created |
//! | Ensemble weights sum to 1.0 | renormalized before storing |

pub mod bootstrap;
pub mod ensemble;
pub mod persistence;
pub mod store;

pub use store::RegistryStore;
