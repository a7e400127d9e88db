use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Firestore returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("auth error: {0}")]
    Auth(#[from] tourseed_auth::AuthError),

    #[error("tour error: {0}")]
    Tour(#[from] tourseed_core::TourError),

    #[error("cannot encode field '{field}': {reason}")]
    Encode { field: String, reason: String },

    #[error("batch of {size} writes exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
}
