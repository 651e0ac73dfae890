use serde::{Deserialize, Serialize};

use super::defaults;

/// Registry store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Location of the persisted registry document.
    pub path: String,
    /// Base directory for locators of custom-registered models.
    pub models_dir: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: defaults::DEFAULT_REGISTRY_PATH.to_string(),
            models_dir: defaults::DEFAULT_MODELS_DIR.to_string(),
        }
    }
}
