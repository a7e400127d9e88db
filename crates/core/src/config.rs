use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";
pub const DEFAULT_RULES_BASE_URL: &str = "https://firebaserules.googleapis.com/v1";
pub const DEFAULT_RULES_TIMEOUT_SECS: u64 = 30;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub firestore: FirestoreConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TOURSEED_PROFILE`. When set (e.g. `STAGING`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TOURSEED_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            firestore: FirestoreConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  firestore:   url={}, database={}, emulator={}",
            self.firestore.endpoint(),
            self.firestore.database,
            self.firestore.emulator_host.as_deref().unwrap_or("(none)")
        );
        tracing::info!(
            "  rules:       url={}, timeout={}s",
            self.rules.base_url,
            self.rules.timeout_secs
        );
    }
}

// ── Firestore ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub database: String,
    /// `host:port` of a local emulator; overrides `base_url` and skips auth.
    pub emulator_host: Option<String>,
}

impl FirestoreConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            base_url: profiled_env_or(p, "FIRESTORE_BASE_URL", DEFAULT_FIRESTORE_BASE_URL),
            database: profiled_env_or(p, "FIRESTORE_DATABASE", DEFAULT_FIRESTORE_DATABASE),
            emulator_host: profiled_env_opt(p, "FIRESTORE_EMULATOR_HOST"),
        }
    }

    /// REST root the client should talk to.
    pub fn endpoint(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!("http://{}/v1", host.trim_end_matches('/')),
            None => self.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn uses_emulator(&self) -> bool {
        self.emulator_host.is_some()
    }
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            database: DEFAULT_FIRESTORE_DATABASE.to_string(),
            emulator_host: None,
        }
    }
}

// ── Firebase Rules API ────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub base_url: String,
    /// Ceiling for each of the two deployment calls.
    pub timeout_secs: u64,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            base_url: profiled_env_or(p, "FIREBASE_RULES_BASE_URL", DEFAULT_RULES_BASE_URL),
            timeout_secs: profiled_env_u64(p, "RULES_TIMEOUT_SECS", DEFAULT_RULES_TIMEOUT_SECS),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RULES_BASE_URL.to_string(),
            timeout_secs: DEFAULT_RULES_TIMEOUT_SECS,
        }
    }
}
