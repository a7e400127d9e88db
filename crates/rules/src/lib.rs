//! Firestore security-rules deployment through the Firebase Rules API.
//!
//! Deploying is two calls: create a ruleset holding the rules source, then
//! point the `cloud.firestore` release at it. The pair is not atomic; if the
//! second call fails the new ruleset stays on the server unreferenced.

pub mod client;
pub mod deploy;
pub mod error;

pub use client::{Release, RulesClient, Ruleset, FIRESTORE_RELEASE, RULES_FILE_NAME};
pub use deploy::{deploy_rules, read_rules, Deployment};
pub use error::RulesError;
