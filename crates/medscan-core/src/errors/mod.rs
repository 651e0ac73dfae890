mod persistence_error;

pub use persistence_error::PersistenceError;

/// Crate-wide result alias.
pub type MedscanResult<T> = Result<T, MedscanError>;

/// Every failure the registry, cache, combiner, and pipeline can raise.
///
/// The core never masks these. Deciding whether to show a degraded answer
/// is left to the boundary layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MedscanError {
    #[error("unsupported category: {category}")]
    UnsupportedCategory { category: String },

    #[error("version not found: {category}/{version}")]
    VersionNotFound { category: String, version: String },

    #[error("invalid ensemble configuration for {category}: {reason}")]
    EnsembleConfig { category: String, reason: String },

    #[error("could not construct predictor {category}/{version}: {reason}")]
    ConstructionFailure {
        category: String,
        version: String,
        reason: String,
    },

    #[error("score vector shape mismatch from member {member}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        member: String,
    },

    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("invalid image data: {reason}")]
    InvalidImage { reason: String },

    #[error("deadline exceeded after {timeout_ms}ms")]
    DeadlineExceeded { timeout_ms: u64 },

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl MedscanError {
    /// Short machine-readable kind, used in structured logs and boundary documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedCategory { .. } => "unsupported_category",
            Self::VersionNotFound { .. } => "version_not_found",
            Self::EnsembleConfig { .. } => "ensemble_config",
            Self::ConstructionFailure { .. } => "construction_failure",
            Self::ShapeMismatch { .. } => "shape_mismatch",
            Self::Persistence(_) => "persistence",
            Self::InvalidImage { .. } => "invalid_image",
            Self::DeadlineExceeded { .. } => "deadline_exceeded",
            Self::Config { .. } => "config",
        }
    }
}
