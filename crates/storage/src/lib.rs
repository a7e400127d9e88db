//! Firestore writes for the tour seeder.
//!
//! - [`value`] encodes JSON records as Firestore typed values
//! - [`WriteBatch`] groups up to [`MAX_BATCH_WRITES`] full-document writes
//! - [`FirestoreClient`] commits batches over the REST API
//! - [`FirestoreFactory`] builds the client once per run
//! - [`batch_write_tours`] drives a whole seeding pass

pub mod batch;
pub mod client;
pub mod error;
pub mod factory;
pub mod seed;
pub mod value;

pub use batch::{Document, Write, WriteBatch, MAX_BATCH_WRITES};
pub use client::{CommitResponse, DocumentStore, FirestoreClient};
pub use error::StorageError;
pub use factory::FirestoreFactory;
pub use seed::{batch_write_tours, SeedReport, TOURS_COLLECTION};
