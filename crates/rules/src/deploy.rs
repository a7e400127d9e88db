use std::path::Path;

use tracing::{info, warn};

use tourseed_auth::TokenSource;

use crate::client::RulesClient;
use crate::error::RulesError;

/// Outcome of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub ruleset_name: String,
    pub release_name: String,
}

/// Read the rules source verbatim.
pub fn read_rules(path: impl AsRef<Path>) -> Result<String, RulesError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| RulesError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a ruleset from `content` and activate it on the Firestore release.
///
/// The release is only touched after the ruleset exists. If activation fails
/// the ruleset is left in place; it is never deleted.
pub async fn deploy_rules(
    client: &RulesClient,
    tokens: &dyn TokenSource,
    content: &str,
) -> Result<Deployment, RulesError> {
    let token = tokens.access_token().await?;

    let ruleset = client.create_ruleset(&token, content).await?;

    let release = match client.update_release(&token, &ruleset.name).await {
        Ok(release) => release,
        Err(e) => {
            warn!(
                ruleset = %ruleset.name,
                error = %e,
                "Release update failed, new ruleset left unreferenced"
            );
            return Err(e);
        }
    };

    // Fall back to the requested name when the response omits it.
    let release_name = if release.name.is_empty() {
        client.release_name()
    } else {
        release.name
    };
    let deployment = Deployment {
        ruleset_name: ruleset.name,
        release_name,
    };
    info!(
        ruleset = %deployment.ruleset_name,
        release = %deployment.release_name,
        "Firestore rules deployed"
    );
    Ok(deployment)
}
