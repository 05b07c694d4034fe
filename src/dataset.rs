//! CSV loading and training-set construction.
//!
//! The songs table and the interaction log are plain CSV files maintained
//! outside this repo. Schema problems (a missing column, a cell that does not
//! parse) are fatal; an absent or not-yet-useful log is a normal condition on
//! a fresh deployment and yields a soft skip instead.

use crate::features::{label_for, normalize_row, FEATURE_COLS};
use anyhow::{Context, Result};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Schema problems in an input table. These abort the run.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{path} is missing required columns: {columns}")]
    MissingColumns { path: String, columns: String },
}

/// One row of the songs table. Only the join key and the ten feature columns
/// are read; anything else in the CSV is ignored. Empty cells read as `None`
/// and are treated as 0.
#[derive(Debug, Clone, Deserialize)]
pub struct SongRow {
    pub track_id: String,
    #[serde(default)]
    pub danceability: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub instrumentalness: Option<f64>,
    #[serde(default)]
    pub liveness: Option<f64>,
    #[serde(default)]
    pub acousticness: Option<f64>,
    #[serde(default)]
    pub speechiness: Option<f64>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub loudness: Option<f64>,
    #[serde(default)]
    pub duration_ms: Option<f64>,
}

impl SongRow {
    /// Raw feature values in canonical column order, missing cells as 0.
    pub fn features(&self) -> [f64; 10] {
        [
            self.danceability.unwrap_or(0.0),
            self.energy.unwrap_or(0.0),
            self.valence.unwrap_or(0.0),
            self.instrumentalness.unwrap_or(0.0),
            self.liveness.unwrap_or(0.0),
            self.acousticness.unwrap_or(0.0),
            self.speechiness.unwrap_or(0.0),
            self.tempo.unwrap_or(0.0),
            self.loudness.unwrap_or(0.0),
            self.duration_ms.unwrap_or(0.0),
        ]
    }
}

/// One row of the interaction log.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionRow {
    pub track_id: String,
    pub action: String,
}

/// Load the songs table, enforcing presence of the join key and all ten
/// feature columns. Missing cells are tolerated, missing columns are not.
pub fn load_songs(path: &Path) -> Result<Vec<SongRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open songs table {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row of {}", path.display()))?
        .clone();
    let missing: Vec<&str> = std::iter::once("track_id")
        .chain(FEATURE_COLS)
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns {
            path: path.display().to_string(),
            columns: missing.join(", "),
        }
        .into());
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: SongRow =
            record.with_context(|| format!("Malformed row in songs table {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Load the interaction log. The file is expected to exist; callers decide
/// what an absent file means.
pub fn load_interactions(path: &Path) -> Result<Vec<InteractionRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open interaction log {}", path.display()))?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: InteractionRow = record
            .with_context(|| format!("Malformed row in interaction log {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Normalized feature matrix over the whole songs table, one row per track,
/// columns in canonical order. This is the clustering input.
pub fn song_matrix(songs: &[SongRow]) -> Result<Array2<f64>> {
    let mut values = Vec::with_capacity(songs.len() * FEATURE_COLS.len());
    for song in songs {
        let mut row = song.features();
        normalize_row(&mut row);
        values.extend(row);
    }
    let matrix = Array2::from_shape_vec((songs.len(), FEATURE_COLS.len()), values)?;
    Ok(matrix)
}

/// A ready-to-train matrix of raw (un-normalized) features with binary
/// labels, one row per joined interaction.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub records: Array2<f64>,
    pub labels: Array1<usize>,
}

/// Why training-set construction was skipped. A skip is a normal outcome for
/// a fresh deployment, not an error; no artifact is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The interaction log file does not exist yet.
    MissingLog,
    /// The interaction log exists but has no rows.
    EmptyLog,
    /// No interaction matched a song in the catalog.
    EmptyJoin,
    /// Every joined row carries the same label.
    SingleClass,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SkipReason::MissingLog => "no interaction log yet",
            SkipReason::EmptyLog => "interaction log has no rows",
            SkipReason::EmptyJoin => "join produced 0 rows; check track_id consistency",
            SkipReason::SingleClass => "need both positive and negative examples",
        };
        f.write_str(msg)
    }
}

/// Result of [`build_training_set`].
#[derive(Debug, Clone)]
pub enum DatasetOutcome {
    Ready(TrainingSet),
    Skipped(SkipReason),
}

/// Inner-join the interaction log to the songs table on `track_id` and derive
/// binary labels from the action column. Interactions without a matching song
/// are dropped.
pub fn build_training_set(logs_path: &Path, songs_path: &Path) -> Result<DatasetOutcome> {
    if !logs_path.exists() {
        return Ok(DatasetOutcome::Skipped(SkipReason::MissingLog));
    }
    let interactions = load_interactions(logs_path)?;
    if interactions.is_empty() {
        return Ok(DatasetOutcome::Skipped(SkipReason::EmptyLog));
    }

    let songs = load_songs(songs_path)?;
    let by_track: HashMap<&str, [f64; 10]> = songs
        .iter()
        .map(|song| (song.track_id.as_str(), song.features()))
        .collect();

    let mut rows: Vec<[f64; 10]> = Vec::with_capacity(interactions.len());
    let mut labels: Vec<usize> = Vec::with_capacity(interactions.len());
    for interaction in &interactions {
        if let Some(features) = by_track.get(interaction.track_id.as_str()) {
            rows.push(*features);
            labels.push(label_for(&interaction.action));
        }
    }

    if rows.is_empty() {
        return Ok(DatasetOutcome::Skipped(SkipReason::EmptyJoin));
    }
    if labels.iter().all(|&label| label == labels[0]) {
        return Ok(DatasetOutcome::Skipped(SkipReason::SingleClass));
    }

    let n_rows = rows.len();
    let records = Array2::from_shape_vec(
        (n_rows, FEATURE_COLS.len()),
        rows.into_iter().flatten().collect(),
    )?;
    Ok(DatasetOutcome::Ready(TrainingSet {
        records,
        labels: Array1::from_vec(labels),
    }))
}
