//! Firestore REST client.
//!
//! Only the `documents:commit` RPC is used: it applies a list of writes
//! atomically, which is exactly what a [`WriteBatch`](crate::WriteBatch) needs.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use tourseed_auth::TokenSource;

use crate::batch::Write;
use crate::error::StorageError;

/// Result of a successful commit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub write_results: Vec<Value>,
    #[serde(default)]
    pub commit_time: Option<String>,
}

/// A document database that accepts atomic batches of writes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fully-qualified name of document `doc_id` inside `collection`.
    fn document_name(&self, collection: &str, doc_id: &str) -> String;

    /// Apply all `writes` atomically.
    async fn commit(&self, writes: Vec<Write>) -> Result<CommitResponse, StorageError>;
}

#[derive(Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

/// Client for one Firestore database.
pub struct FirestoreClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    database: String,
    tokens: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for FirestoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreClient")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl FirestoreClient {
    /// `endpoint` is the REST root, e.g. `https://firestore.googleapis.com/v1`.
    pub fn new(
        endpoint: &str,
        project_id: &str,
        database: &str,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!(
            endpoint = %endpoint,
            project = %project_id,
            database = %database,
            "FirestoreClient initialised"
        );
        Self {
            // No request timeout: commits wait as long as the server needs.
            http: reqwest::Client::new(),
            endpoint,
            project_id: project_id.to_string(),
            database: database.to_string(),
            tokens,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `projects/{p}/databases/{db}`
    pub fn database_path(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database)
    }

    fn commit_url(&self) -> String {
        format!("{}/{}/documents:commit", self.endpoint, self.database_path())
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    fn document_name(&self, collection: &str, doc_id: &str) -> String {
        format!("{}/documents/{}/{}", self.database_path(), collection, doc_id)
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<CommitResponse, StorageError> {
        let count = writes.len();
        let token = self.tokens.access_token().await?;

        debug!(writes = count, "Committing batch");

        let response = self
            .http
            .post(self.commit_url())
            .bearer_auth(token)
            .json(&CommitRequest { writes })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(StorageError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let committed: CommitResponse = response.json().await?;
        debug!(
            writes = count,
            commit_time = committed.commit_time.as_deref().unwrap_or("-"),
            "Batch committed"
        );
        Ok(committed)
    }
}
