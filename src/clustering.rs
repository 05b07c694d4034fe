//! Seeded k-means over the normalized song matrix.

use anyhow::{bail, Context, Result};
use linfa::prelude::*;
use linfa::DatasetBase;
use linfa_clustering::KMeans;
use ndarray::Array2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/// Number of centroids exported for the similarity bonus.
pub const NUM_CLUSTERS: usize = 12;

/// Fixed RNG seed, so re-running on identical input reproduces the artifact.
pub const SEED: u64 = 42;

/// Independent restarts; the best-inertia solution wins.
const RESTARTS: usize = 10;
const MAX_ITERATIONS: u64 = 300;
const TOLERANCE: f64 = 1e-4;

/// Fit k-means with k-means++ initialization and return the centroid matrix,
/// [`NUM_CLUSTERS`] rows by ten feature columns.
///
/// Fails when the input has fewer rows than clusters; the caller treats that
/// as fatal, same as any other malformed input.
pub fn fit_centroids(records: Array2<f64>) -> Result<Array2<f64>> {
    if records.nrows() < NUM_CLUSTERS {
        bail!(
            "Need at least {} songs to fit {} clusters, got {}",
            NUM_CLUSTERS,
            NUM_CLUSTERS,
            records.nrows()
        );
    }
    let dataset = DatasetBase::from(records);
    let model = KMeans::params_with_rng(NUM_CLUSTERS, Xoshiro256Plus::seed_from_u64(SEED))
        .n_runs(RESTARTS)
        .max_n_iterations(MAX_ITERATIONS)
        .tolerance(TOLERANCE)
        .fit(&dataset)
        .context("K-means fit failed")?;
    Ok(model.centroids().to_owned())
}
