//! Common test infrastructure
//!
//! CSV fixture builders shared by the end-to-end tests. Tests get a temp
//! directory laid out like a real deployment: the songs table at the root,
//! the interaction log under `logs/`, artifacts written under `data/`.

// Each e2e binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SONGS_HEADER: &str = "track_id,track_name,danceability,energy,valence,instrumentalness,liveness,acousticness,speechiness,tempo,loudness,duration_ms";

/// A deployment-shaped temp directory for one test.
pub struct TrainerFixture {
    pub dir: TempDir,
}

impl TrainerFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn songs_path(&self) -> PathBuf {
        self.dir.path().join("spotify_songs.csv")
    }

    pub fn logs_path(&self) -> PathBuf {
        self.dir.path().join("logs").join("interactions.csv")
    }

    pub fn centroids_path(&self) -> PathBuf {
        self.dir.path().join("data").join("kmeans_centroids.json")
    }

    pub fn weights_path(&self) -> PathBuf {
        self.dir.path().join("data").join("feature_weights.json")
    }

    /// Write a songs table with `count` synthetic but deterministic tracks,
    /// ids `t0..t{count-1}`.
    pub fn write_songs(&self, count: usize) {
        let mut csv = String::from(SONGS_HEADER);
        for i in 0..count {
            let unit = |offset: usize| ((i * 7 + offset * 3) % 13) as f64 / 13.0;
            write!(
                csv,
                "\nt{i},Track {i},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.1},{:.1},{}",
                unit(0),
                unit(1),
                unit(2),
                unit(3),
                unit(4),
                unit(5),
                unit(6),
                60.0 + ((i * 17) % 180) as f64,
                -50.0 + ((i * 13) % 50) as f64,
                120_000 + (i * 9_001) % 400_000,
            )
            .unwrap();
        }
        csv.push('\n');
        fs::write(self.songs_path(), csv).expect("write songs csv");
    }

    /// Write an interaction log from (track_id, action) pairs.
    pub fn write_interactions(&self, rows: &[(&str, &str)]) {
        let mut csv = String::from("track_id,action");
        for (track_id, action) in rows {
            write!(csv, "\n{track_id},{action}").unwrap();
        }
        csv.push('\n');
        self.write_raw_interactions(&csv);
    }

    /// Write the interaction log verbatim (for empty/degenerate files).
    pub fn write_raw_interactions(&self, content: &str) {
        let path = self.logs_path();
        fs::create_dir_all(path.parent().unwrap()).expect("create logs dir");
        fs::write(path, content).expect("write interactions csv");
    }
}
