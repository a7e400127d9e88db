use std::path::PathBuf;

use clap::Parser;
use tourseed_core::DEFAULT_SEED_FILE;

/// Seed the Firestore `tours` collection and optionally deploy security rules.
#[derive(Parser, Debug, Clone)]
#[command(name = "tourseed", version, about = "Seed Firestore tours and apply rules")]
pub struct CliArgs {
    /// Firebase project ID
    #[arg(long, env = "FIREBASE_PROJECT_ID")]
    pub project_id: String,

    /// Path to the Firebase service account JSON file
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    pub service_account: PathBuf,

    /// Path to the seed tours JSON file
    #[arg(long, default_value = DEFAULT_SEED_FILE)]
    pub seed_file: PathBuf,

    /// Path to the Firestore rules file
    #[arg(long, default_value = "firestore.rules")]
    pub rules_file: PathBuf,

    /// Skip seeding the tours collection
    #[arg(long)]
    pub skip_seed: bool,

    /// Deploy Firestore rules via the Rules API
    #[arg(long)]
    pub apply_rules: bool,
}
