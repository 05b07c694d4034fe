//! Feature columns, normalization, and interaction labels.
//!
//! The ten audio descriptors and the scaling applied to them are shared
//! contract with the similarity scorer that consumes the exported artifacts.
//! Centroids are compared against vectors the scorer normalizes the same way,
//! so any change here must ship together with the scoring side.

/// The ten audio feature columns, in the canonical order used everywhere:
/// CSV access, training matrices, exported centroids and weight keys.
pub const FEATURE_COLS: [&str; 10] = [
    "danceability",
    "energy",
    "valence",
    "instrumentalness",
    "liveness",
    "acousticness",
    "speechiness",
    "tempo",
    "loudness",
    "duration_ms",
];

/// Clip-and-rescale a raw feature value into the scorer's normalized space.
///
/// Tempo (BPM), loudness (dB) and duration (ms) have static ranges; the
/// remaining features are assumed to already live in [0, 1] and pass through
/// unchanged. The scorer additionally clamps those seven on its side, the
/// training pipeline never has.
pub fn normalize_feature(name: &str, value: f64) -> f64 {
    match name {
        "tempo" => value.clamp(0.0, 250.0) / 250.0,
        "loudness" => (value.clamp(-60.0, 0.0) + 60.0) / 60.0,
        "duration_ms" => value.clamp(0.0, 600_000.0) / 600_000.0,
        _ => value,
    }
}

/// Normalize a full feature row in place. Values must be in [`FEATURE_COLS`]
/// order.
pub fn normalize_row(row: &mut [f64; 10]) {
    for (name, value) in FEATURE_COLS.iter().zip(row.iter_mut()) {
        *value = normalize_feature(name, *value);
    }
}

/// User interaction types recorded in the listening log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    PlayStart,
    PlayComplete,
    Replay,
    SkipEarly,
    SkipLate,
    Like,
    Dislike,
    NotInterested,
}

impl Action {
    /// Parse the log's string representation. Returns `None` for anything
    /// outside the known taxonomy.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PLAY_START" => Some(Action::PlayStart),
            "PLAY_COMPLETE" => Some(Action::PlayComplete),
            "REPLAY" => Some(Action::Replay),
            "SKIP_EARLY" => Some(Action::SkipEarly),
            "SKIP_LATE" => Some(Action::SkipLate),
            "LIKE" => Some(Action::Like),
            "DISLIKE" => Some(Action::Dislike),
            "NOT_INTERESTED" => Some(Action::NotInterested),
            _ => None,
        }
    }

    /// Whether this action counts as positive engagement.
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Action::PlayComplete | Action::Replay | Action::Like
        )
    }
}

/// Binary training label for an interaction's action string.
///
/// Anything that is not an explicitly positive action lands in the negative
/// class, including `PLAY_START` and unrecognized strings. Whether those
/// should instead be excluded from training is an open call; the weights the
/// scorer runs with have always been trained this way, so the behavior is
/// kept as-is.
pub fn label_for(action: &str) -> usize {
    let positive = Action::parse(action).map(Action::is_positive).unwrap_or(false);
    usize::from(positive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_clipped_high() {
        // 300 BPM is above the static range and saturates at 1.0
        assert_eq!(normalize_feature("tempo", 300.0), 1.0);
        assert_eq!(normalize_feature("tempo", 125.0), 0.5);
        assert_eq!(normalize_feature("tempo", -10.0), 0.0);
    }

    #[test]
    fn test_loudness_clipped_low() {
        // -70 dB is below the static range and saturates at 0.0
        assert_eq!(normalize_feature("loudness", -70.0), 0.0);
        assert_eq!(normalize_feature("loudness", -30.0), 0.5);
        assert_eq!(normalize_feature("loudness", 5.0), 1.0);
    }

    #[test]
    fn test_duration_range() {
        assert_eq!(normalize_feature("duration_ms", 600_000.0), 1.0);
        assert_eq!(normalize_feature("duration_ms", 900_000.0), 1.0);
        assert_eq!(normalize_feature("duration_ms", 300_000.0), 0.5);
        assert_eq!(normalize_feature("duration_ms", -1.0), 0.0);
    }

    #[test]
    fn test_unit_features_pass_through() {
        // Already-[0,1] features are not touched, even out-of-range values
        assert_eq!(normalize_feature("danceability", 0.73), 0.73);
        assert_eq!(normalize_feature("energy", 1.2), 1.2);
        assert_eq!(normalize_feature("valence", -0.1), -0.1);
    }

    #[test]
    fn test_scaled_features_stay_in_unit_interval() {
        for value in [-1000.0, -60.0, -0.5, 0.0, 1.0, 249.0, 251.0, 1e9] {
            for name in ["tempo", "loudness", "duration_ms"] {
                let normalized = normalize_feature(name, value);
                assert!(
                    (0.0..=1.0).contains(&normalized),
                    "{} = {} normalized to {} outside [0,1]",
                    name,
                    value,
                    normalized
                );
            }
        }
    }

    #[test]
    fn test_normalize_row_matches_per_column() {
        let mut row = [0.5, 0.6, 0.7, 0.1, 0.2, 0.3, 0.05, 125.0, -30.0, 300_000.0];
        normalize_row(&mut row);
        assert_eq!(
            row,
            [0.5, 0.6, 0.7, 0.1, 0.2, 0.3, 0.05, 0.5, 0.5, 0.5]
        );
    }

    #[test]
    fn test_action_parse_round_trip() {
        let known = [
            ("PLAY_START", Action::PlayStart),
            ("PLAY_COMPLETE", Action::PlayComplete),
            ("REPLAY", Action::Replay),
            ("SKIP_EARLY", Action::SkipEarly),
            ("SKIP_LATE", Action::SkipLate),
            ("LIKE", Action::Like),
            ("DISLIKE", Action::Dislike),
            ("NOT_INTERESTED", Action::NotInterested),
        ];
        for (s, action) in known {
            assert_eq!(Action::parse(s), Some(action));
        }
        assert_eq!(Action::parse("SHARED"), None);
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("like"), None); // case sensitive
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for("PLAY_COMPLETE"), 1);
        assert_eq!(label_for("REPLAY"), 1);
        assert_eq!(label_for("LIKE"), 1);
        assert_eq!(label_for("SKIP_EARLY"), 0);
        assert_eq!(label_for("SKIP_LATE"), 0);
        assert_eq!(label_for("DISLIKE"), 0);
        assert_eq!(label_for("NOT_INTERESTED"), 0);
        // Neither positive nor negative: falls into the negative class
        assert_eq!(label_for("PLAY_START"), 0);
        assert_eq!(label_for("SOMETHING_NEW"), 0);
    }
}
