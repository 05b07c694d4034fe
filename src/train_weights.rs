//! Feature-weight exporter.
//!
//! Joins the interaction log with the song table, labels rows by action,
//! fits a seeded random forest, and writes the normalized per-feature
//! importance weights the scorer uses for its weighted similarity.

use anyhow::Result;
use clap::Parser;
use similarity_trainer::{dataset, export, weights, DatasetOutcome};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the interaction log.
    #[clap(long, default_value = "logs/interactions.csv")]
    logs: PathBuf,

    /// Path to the song feature table.
    #[clap(long, default_value = "spotify_songs.csv")]
    songs: PathBuf,

    /// Path to write the feature-weight artifact to.
    #[clap(long, default_value = "data/feature_weights.json")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let training = match dataset::build_training_set(&cli_args.logs, &cli_args.songs)? {
        DatasetOutcome::Ready(training) => training,
        DatasetOutcome::Skipped(reason) => {
            // Normal on a fresh deployment; leave the previous artifact alone.
            info!("Skipping training: {}", reason);
            return Ok(());
        }
    };

    info!(
        "Training on {} joined interactions",
        training.records.nrows()
    );
    let feature_weights = weights::fit_feature_weights(&training)?;
    export::write_feature_weights(&cli_args.out, &feature_weights)?;

    info!("Exported feature weights to {}", cli_args.out.display());
    Ok(())
}
