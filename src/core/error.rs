use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("invalid field '{field}': {reason}")]
    Schema { field: String, reason: String },

    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("corpus read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("model artifact not found at {0} (run `amorcast train` first)")]
    ArtifactNotFound(PathBuf),

    #[error("model artifact is corrupt: {0}")]
    ArtifactCorrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScoreError {
    pub fn schema(field: &str, reason: impl Into<String>) -> Self {
        ScoreError::Schema {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoreError>;
