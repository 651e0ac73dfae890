// Single source of truth for all default values.

// --- Registry ---
pub const DEFAULT_REGISTRY_PATH: &str = "models/model_registry.json";
pub const DEFAULT_MODELS_DIR: &str = "models";

// --- Inference ---
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.15;
pub const DEFAULT_INFECTION_THRESHOLD: f64 = 0.3;
pub const DEFAULT_CONSTRUCTION_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_PREPROCESSING: &str = "standard";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
