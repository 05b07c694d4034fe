//! Random-forest feature importances.
//!
//! linfa ships no forest learner that aggregates importances, so the forest
//! is assembled the classic way: bootstrap-resample the training set, fit one
//! CART tree per sample, and average the per-tree impurity-decrease
//! importances. The resampling RNG is seeded, so identical input reproduces
//! identical weights.

use crate::dataset::TrainingSet;
use crate::features::FEATURE_COLS;
use anyhow::{Context, Result};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_trees::DecisionTree;
use ndarray::Axis;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

/// Trees in the forest.
pub const NUM_TREES: usize = 200;

/// Fixed RNG seed for the bootstrap resampling.
pub const SEED: u64 = 42;

/// Fit the forest and return one normalized importance per feature column,
/// in canonical order. All values are >= 0 and sum to 1.
pub fn fit_feature_weights(training: &TrainingSet) -> Result<[f64; 10]> {
    let n_rows = training.records.nrows();
    let mut rng = Xoshiro256Plus::seed_from_u64(SEED);
    let mut totals = [0.0f64; FEATURE_COLS.len()];

    for _ in 0..NUM_TREES {
        let indices: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
        let sample = Dataset::new(
            training.records.select(Axis(0), &indices),
            training.labels.select(Axis(0), &indices),
        );
        let tree: DecisionTree<f64, usize> = DecisionTree::params()
            .fit(&sample)
            .context("Decision tree fit failed")?;
        // A bootstrap sample can come out single-class; the resulting tree
        // never splits and its normalized importances are not finite. Such
        // trees contribute nothing.
        for (total, importance) in totals.iter_mut().zip(tree.feature_importance()) {
            if importance.is_finite() {
                *total += importance;
            }
        }
    }

    // Importance mass varies with how many trees actually split, so
    // renormalize the averages to a distribution over features.
    let sum: f64 = totals.iter().sum();
    if sum > 0.0 {
        for weight in totals.iter_mut() {
            *weight /= sum;
        }
    }
    Ok(totals)
}
