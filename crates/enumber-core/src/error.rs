use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EnumberError {
    #[error("failed to fetch taxonomy from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unrecognized taxonomy payload: {0}")]
    SourceFormat(String),

    #[error("invalid {kind} '{value}'")]
    InvalidFilter { kind: &'static str, value: String },

    #[error("required relation '{0}' not found in store")]
    MissingRelation(String),

    #[error("failed to load config from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("invalid additive code '{0}'")]
    InvalidCode(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
