//! JSON artifact writers.
//!
//! Both artifacts are pretty-printed UTF-8 JSON, written in place (no
//! temp-file-and-rename); a concurrent reader during a write can observe a
//! partial file. Parent directories are created on demand.

use crate::features::FEATURE_COLS;
use anyhow::{Context, Result};
use ndarray::Array2;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct CentroidArtifact {
    centroids: Vec<Vec<f64>>,
}

/// Write the centroid artifact: `{"centroids": [[f0..f9], ...]}`, rows in
/// cluster order, columns in canonical feature order.
pub fn write_centroids(path: &Path, centroids: &Array2<f64>) -> Result<()> {
    let artifact = CentroidArtifact {
        centroids: centroids
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect(),
    };
    write_pretty(path, &artifact)
}

/// Write the feature-weight artifact: a JSON object keyed by feature name,
/// keys emitted in canonical column order.
pub fn write_feature_weights(path: &Path, weights: &[f64; 10]) -> Result<()> {
    let mut object = Map::new();
    for (name, weight) in FEATURE_COLS.iter().zip(weights) {
        object.insert((*name).to_string(), Value::from(*weight));
    }
    write_pretty(path, &Value::Object(object))
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
