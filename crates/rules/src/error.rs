use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rules file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("auth error: {0}")]
    Auth(#[from] tourseed_auth::AuthError),

    #[error("Rules API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Rules API call timed out after {}s", .timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ruleset response did not include a name")]
    MissingRulesetName,
}
