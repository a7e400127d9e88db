use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::RulesError;

/// Logical file name the rules source is stored under inside a ruleset.
pub const RULES_FILE_NAME: &str = "firestore.rules";

/// Release that Firestore reads its active rules from.
pub const FIRESTORE_RELEASE: &str = "cloud.firestore";

/// A created ruleset. `name` is `projects/{p}/rulesets/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RulesetResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    create_time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub update_time: Option<String>,
}

/// Client for `firebaserules.googleapis.com` scoped to one project.
pub struct RulesClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    timeout: Duration,
}

impl RulesClient {
    /// Every request made by this client is bounded by `timeout`.
    pub fn new(base_url: &str, project_id: &str, timeout: Duration) -> Result<Self, RulesError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
            timeout,
        })
    }

    /// `projects/{p}`
    pub fn project_path(&self) -> String {
        format!("projects/{}", self.project_id)
    }

    /// `projects/{p}/releases/cloud.firestore`
    pub fn release_name(&self) -> String {
        format!("{}/releases/{}", self.project_path(), FIRESTORE_RELEASE)
    }

    /// Create a ruleset containing `content` as `firestore.rules`.
    pub async fn create_ruleset(&self, token: &str, content: &str) -> Result<Ruleset, RulesError> {
        let url = format!("{}/{}/rulesets", self.base_url, self.project_path());
        let body = json!({
            "source": {
                "files": [{ "name": RULES_FILE_NAME, "content": content }]
            }
        });

        debug!(url = %url, bytes = content.len(), "Creating ruleset");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let response = self.check_status(response).await?;

        let parsed: RulesetResponse = response.json().await.map_err(|e| self.classify(e))?;
        let name = parsed
            .name
            .filter(|n| !n.is_empty())
            .ok_or(RulesError::MissingRulesetName)?;

        info!(
            ruleset = %name,
            create_time = parsed.create_time.as_deref().unwrap_or("-"),
            "Ruleset created"
        );
        Ok(Ruleset { name })
    }

    /// Point the `cloud.firestore` release at `ruleset_name`.
    ///
    /// Only `rulesetName` is in the update mask, so nothing else about the
    /// release changes.
    pub async fn update_release(&self, token: &str, ruleset_name: &str) -> Result<Release, RulesError> {
        let release_name = self.release_name();
        let url = format!("{}/{}?updateMask=rulesetName", self.base_url, release_name);
        let body = json!({
            "release": {
                "name": release_name,
                "rulesetName": ruleset_name,
            }
        });

        debug!(url = %url, ruleset = %ruleset_name, "Updating release");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let response = self.check_status(response).await?;

        let release: Release = response.json().await.map_err(|e| self.classify(e))?;
        info!(
            release = %release_name,
            ruleset = %ruleset_name,
            update_time = release.update_time.as_deref().unwrap_or("-"),
            "Release updated"
        );
        Ok(release)
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response, RulesError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Err(RulesError::Upstream {
            status: status.as_u16(),
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> RulesError {
        if error.is_timeout() {
            RulesError::Timeout {
                timeout: self.timeout,
            }
        } else {
            RulesError::Http(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names() {
        let client = RulesClient::new(
            "https://firebaserules.googleapis.com/v1/",
            "demo",
            Duration::from_secs(30),
        )
        .unwrap();
        assert_eq!(client.project_path(), "projects/demo");
        assert_eq!(client.release_name(), "projects/demo/releases/cloud.firestore");
    }
}
