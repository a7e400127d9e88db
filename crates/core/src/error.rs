use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Format(String),

    #[error("tour at index {index} is missing the 'id' field")]
    MissingId { index: usize },

    #[error("tour at index {index} has an invalid id {value}: {reason}")]
    InvalidId {
        index: usize,
        value: String,
        reason: String,
    },

    #[error("invalid service account key {}: {reason}", .path.display())]
    Credentials { path: PathBuf, reason: String },
}
