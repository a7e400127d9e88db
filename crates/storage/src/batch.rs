use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{CommitResponse, DocumentStore};
use crate::error::StorageError;

/// Most writes a single atomic commit may carry.
pub const MAX_BATCH_WRITES: usize = 400;

/// One entry of a `documents:commit` request.
///
/// Only full-document updates are produced: without an update mask Firestore
/// replaces the stored document with `fields`.
#[derive(Debug, Clone, Serialize)]
pub struct Write {
    pub update: Document,
}

#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Fully-qualified resource name, `projects/{p}/databases/{db}/documents/{path}`.
    pub name: String,
    /// Firestore-encoded fields.
    pub fields: Map<String, Value>,
}

/// Pending writes that will be committed together.
#[derive(Debug, Default)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a full overwrite of document `name`.
    pub fn set(&mut self, name: String, fields: Map<String, Value>) -> Result<(), StorageError> {
        if self.is_full() {
            return Err(StorageError::BatchTooLarge {
                size: self.writes.len() + 1,
                limit: MAX_BATCH_WRITES,
            });
        }
        self.writes.push(Write {
            update: Document { name, fields },
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.writes.len() >= MAX_BATCH_WRITES
    }

    /// Send every staged write in one atomic commit.
    pub async fn commit<S>(self, store: &S) -> Result<CommitResponse, StorageError>
    where
        S: DocumentStore + ?Sized,
    {
        store.commit(self.writes).await
    }
}
