pub mod defaults;
mod inference_config;
mod observability_config;
mod registry_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use inference_config::InferenceConfig;
pub use observability_config::ObservabilityConfig;
pub use registry_config::RegistryConfig;

use crate::errors::{MedscanError, MedscanResult, PersistenceError};

/// Top-level configuration. Every section falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MedscanConfig {
    pub registry: RegistryConfig,
    pub inference: InferenceConfig,
    pub observability: ObservabilityConfig,
}

impl MedscanConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> MedscanResult<Self> {
        toml::from_str(toml_str).map_err(|e| MedscanError::Config {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> MedscanResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PersistenceError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&content)
    }
}
