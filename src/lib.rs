//! Offline trainers for the similarity/ranking service.
//!
//! This library backs two batch binaries: `train-clusters` exports k-means
//! centroids over the song catalog, and `train-weights` exports per-feature
//! importance weights learned from the interaction log. Both read CSV tables,
//! fit a seeded model, and write a small JSON artifact the scoring side loads
//! at startup.

pub mod clustering;
pub mod dataset;
pub mod export;
pub mod features;
pub mod weights;

// Re-export commonly used types for convenience
pub use dataset::{DatasetOutcome, SkipReason, TrainingSet};
pub use features::{Action, FEATURE_COLS};
