/// medscan system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version id that `model_type = "ensemble"` resolves to.
pub const ENSEMBLE_VERSION_ALIAS: &str = "ensemble";

/// Model type string for ensemble resolution.
pub const MODEL_TYPE_ENSEMBLE: &str = "ensemble";

/// Architecture tag stored on ensemble records.
pub const ENSEMBLE_ARCHITECTURE: &str = "ensemble";

/// Preprocessing profile used when nothing more specific is known.
pub const STANDARD_PREPROCESSING: &str = "standard";

/// Baseline version id synthesized for every default category.
pub const BASELINE_VERSION: &str = "v1";

/// Architecture of the synthesized baseline versions.
pub const BASELINE_ARCHITECTURE: &str = "resnet50";

/// Tolerance used when checking that ensemble weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Number of results returned when nothing clears the confidence threshold.
pub const FALLBACK_TOP_K: usize = 2;

/// Confidence bands for recommendation text.
pub const HIGH_CONFIDENCE_BAND: f64 = 0.7;
pub const MODERATE_CONFIDENCE_BAND: f64 = 0.5;
