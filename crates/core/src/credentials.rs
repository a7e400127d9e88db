use std::path::Path;

use serde::Deserialize;

use crate::error::TourError;

/// Token endpoint used when the key file does not name one.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Google service-account key file (the JSON downloaded from the console).
///
/// Only the fields needed to mint access tokens are kept.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

// Hand-written so the private key never ends up in logs.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    /// Load and validate a key file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TourError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| TourError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let key: Self = serde_json::from_str(&content).map_err(|e| TourError::Credentials {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(TourError::Credentials {
                    path: path.to_path_buf(),
                    reason: format!("expected type 'service_account', got '{kind}'"),
                });
            }
        }
        if key.client_email.is_empty() || key.private_key.is_empty() {
            return Err(TourError::Credentials {
                path: path.to_path_buf(),
                reason: "client_email and private_key must not be empty".into(),
            });
        }
        Ok(key)
    }
}
