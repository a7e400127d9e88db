use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use tourseed_auth::{ServiceAccountTokenSource, StaticTokenSource, TokenSource};
use tourseed_core::config::FirestoreConfig;
use tourseed_core::ServiceAccountKey;

use crate::client::FirestoreClient;
use crate::error::StorageError;

/// Token the Firestore emulator accepts as an admin credential.
const EMULATOR_TOKEN: &str = "owner";

/// Builds the Firestore client once and hands out the same handle afterwards.
#[derive(Default)]
pub struct FirestoreFactory {
    client: Option<Arc<FirestoreClient>>,
}

impl FirestoreFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Return the existing client, or build one with `build`.
    ///
    /// `build` runs at most once per factory; a failed build leaves the
    /// factory uninitialized.
    pub fn get_or_try_init<F>(&mut self, build: F) -> Result<Arc<FirestoreClient>, StorageError>
    where
        F: FnOnce() -> Result<FirestoreClient, StorageError>,
    {
        if let Some(client) = &self.client {
            debug!("Reusing initialised Firestore client");
            return Ok(client.clone());
        }
        let client = Arc::new(build()?);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Return the client for `project_id`, authenticating with the key at
    /// `service_account` (or the emulator token when an emulator is configured).
    pub fn get_or_init(
        &mut self,
        config: &FirestoreConfig,
        project_id: &str,
        service_account: &Path,
    ) -> Result<Arc<FirestoreClient>, StorageError> {
        self.get_or_try_init(|| {
            let tokens: Arc<dyn TokenSource> = if config.uses_emulator() {
                Arc::new(StaticTokenSource::new(EMULATOR_TOKEN))
            } else {
                let key = ServiceAccountKey::from_file(service_account)?;
                Arc::new(ServiceAccountTokenSource::cloud_platform(key)?)
            };
            Ok(FirestoreClient::new(
                &config.endpoint(),
                project_id,
                &config.database,
                tokens,
            ))
        })
    }
}
