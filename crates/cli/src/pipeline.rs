//! The two phases of a run: seed the tours collection, then deploy rules.
//!
//! Phases run in that order and the first error ends the run. Credentials are
//! only read inside a phase, so a run that skips both touches neither the
//! key file nor the network.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use tourseed_auth::ServiceAccountTokenSource;
use tourseed_core::{load_seed_data, Config, ServiceAccountKey};
use tourseed_rules::{deploy_rules, read_rules, Deployment, RulesClient};
use tourseed_storage::{batch_write_tours, FirestoreFactory, SeedReport};

use crate::cli::CliArgs;

/// What a run did; `None` for phases that were not requested.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub seed: Option<SeedReport>,
    pub deployment: Option<Deployment>,
}

pub async fn run(args: &CliArgs, config: &Config) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if args.skip_seed {
        info!("Skipping seed phase");
    } else {
        let mut factory = FirestoreFactory::new();
        let report = seed(args, config, &mut factory).await?;
        println!("Seeded {} tours into Firestore.", report.tours_written);
        summary.seed = Some(report);
    }

    if args.apply_rules {
        let deployment = apply_rules(args, config).await?;
        println!("Firestore rules deployed.");
        summary.deployment = Some(deployment);
    }

    Ok(summary)
}

async fn seed(args: &CliArgs, config: &Config, factory: &mut FirestoreFactory) -> Result<SeedReport> {
    let tours = load_seed_data(&args.seed_file)
        .with_context(|| format!("failed to load seed file {}", args.seed_file.display()))?;
    info!(count = tours.len(), file = %args.seed_file.display(), "Seeding tours");

    let client = factory
        .get_or_init(&config.firestore, &args.project_id, &args.service_account)
        .context("failed to initialise Firestore client")?;

    batch_write_tours(client.as_ref(), tours)
        .await
        .context("failed to seed tours collection")
}

async fn apply_rules(args: &CliArgs, config: &Config) -> Result<Deployment> {
    let content = read_rules(&args.rules_file)?;

    let key = ServiceAccountKey::from_file(&args.service_account)
        .context("failed to load service account")?;
    let tokens = ServiceAccountTokenSource::cloud_platform(key)
        .context("failed to prepare token source")?;
    info!(client_email = %tokens.client_email(), "Deploying Firestore rules");

    let client = RulesClient::new(
        &config.rules.base_url,
        &args.project_id,
        Duration::from_secs(config.rules.timeout_secs),
    )?;

    deploy_rules(&client, &tokens, &content)
        .await
        .context("failed to deploy Firestore rules")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(dir: &std::path::Path) -> CliArgs {
        CliArgs {
            project_id: "demo".into(),
            service_account: dir.join("missing-service-account.json"),
            seed_file: dir.join("seed_tours.json"),
            rules_file: dir.join("firestore.rules"),
            skip_seed: false,
            apply_rules: false,
        }
    }

    #[tokio::test]
    async fn test_nothing_requested_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CliArgs {
            skip_seed: true,
            ..args(tmp.path())
        };

        // Neither the key file nor any endpoint exists; nothing may touch them.
        let summary = run(&args, &Config::default()).await.unwrap();
        assert!(summary.seed.is_none());
        assert!(summary.deployment.is_none());
    }

    #[tokio::test]
    async fn test_bad_seed_file_fails_before_rules() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("seed_tours.json"), r#"{"not": "an array"}"#).unwrap();
        let args = CliArgs {
            apply_rules: true,
            ..args(tmp.path())
        };

        let err = run(&args, &Config::default()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("failed to load seed file"), "{message}");
        assert!(message.contains("must be an array"), "{message}");
    }

    #[tokio::test]
    async fn test_missing_rules_file_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let args = CliArgs {
            skip_seed: true,
            apply_rules: true,
            rules_file: PathBuf::from("/nonexistent/firestore.rules"),
            ..args(tmp.path())
        };

        let err = run(&args, &Config::default()).await.unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/firestore.rules"));
    }

    #[tokio::test]
    async fn test_missing_service_account_fails_rules_phase() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("firestore.rules"), "service cloud.firestore {}").unwrap();
        let args = CliArgs {
            skip_seed: true,
            apply_rules: true,
            ..args(tmp.path())
        };

        let err = run(&args, &Config::default()).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to load service account"));
    }
}
