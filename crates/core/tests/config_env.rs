//! Environment-driven config tests.
//!
//! These mutate process env vars, so they share a lock and run serially.

use std::env;
use std::sync::Mutex;

use tourseed_core::Config;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    let keys = [
        "TOURSEED_PROFILE",
        "FIRESTORE_BASE_URL",
        "FIRESTORE_DATABASE",
        "FIRESTORE_EMULATOR_HOST",
        "FIREBASE_RULES_BASE_URL",
        "RULES_TIMEOUT_SECS",
        "STAGING_FIRESTORE_DATABASE",
        "STAGING_RULES_TIMEOUT_SECS",
    ];
    for k in keys {
        env::remove_var(k);
    }
}

#[test]
fn test_config_from_env() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env();

    env::set_var("FIRESTORE_BASE_URL", "http://127.0.0.1:9000/v1");
    env::set_var("FIRESTORE_DATABASE", "tours-db");
    env::set_var("FIREBASE_RULES_BASE_URL", "http://127.0.0.1:9001/v1");
    env::set_var("RULES_TIMEOUT_SECS", "5");

    let cfg = Config::from_env();
    assert_eq!(cfg.profile_label(), "default");
    assert_eq!(cfg.firestore.endpoint(), "http://127.0.0.1:9000/v1");
    assert_eq!(cfg.firestore.database, "tours-db");
    assert!(!cfg.firestore.uses_emulator());
    assert_eq!(cfg.rules.base_url, "http://127.0.0.1:9001/v1");
    assert_eq!(cfg.rules.timeout_secs, 5);

    clear_env();
}

#[test]
fn test_config_profile_overrides() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env();

    env::set_var("FIRESTORE_DATABASE", "base-db");
    env::set_var("TOURSEED_PROFILE", "staging");
    env::set_var("STAGING_FIRESTORE_DATABASE", "staging-db");
    env::set_var("STAGING_RULES_TIMEOUT_SECS", "not-a-number");

    let cfg = Config::from_env();
    assert_eq!(cfg.profile, "STAGING");
    assert_eq!(cfg.firestore.database, "staging-db");
    // Unparseable values fall back to the default.
    assert_eq!(cfg.rules.timeout_secs, 30);

    clear_env();
}

#[test]
fn test_config_emulator_from_env() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env();

    env::set_var("FIRESTORE_EMULATOR_HOST", "localhost:8080");
    let cfg = Config::from_env();
    assert!(cfg.firestore.uses_emulator());
    assert_eq!(cfg.firestore.endpoint(), "http://localhost:8080/v1");

    clear_env();
}
