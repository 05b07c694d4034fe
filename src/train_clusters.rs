//! Centroid exporter.
//!
//! Reads the song feature table, normalizes it, fits seeded k-means, and
//! writes the centroid artifact consumed by the scorer's cluster bonus.

use anyhow::Result;
use clap::Parser;
use similarity_trainer::{clustering, dataset, export};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the song feature table.
    #[clap(long, default_value = "spotify_songs.csv")]
    songs: PathBuf,

    /// Path to write the centroid artifact to.
    #[clap(long, default_value = "data/kmeans_centroids.json")]
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

    info!("Loading songs table from {:?}...", cli_args.songs);
    let songs = dataset::load_songs(&cli_args.songs)?;
    info!("Loaded {} songs", songs.len());

    let matrix = dataset::song_matrix(&songs)?;
    let centroids = clustering::fit_centroids(matrix)?;
    export::write_centroids(&cli_args.out, &centroids)?;

    info!(
        "Saved {} centroids to {}",
        centroids.nrows(),
        cli_args.out.display()
    );
    Ok(())
}
