/// Registry document read/write errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PersistenceError {
    #[error("read failed: {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("write failed: {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("corrupt registry document: {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("serialization failed: {reason}")]
    Serialization { reason: String },
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
