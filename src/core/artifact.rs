use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::encoder::FeatureEncoder;
use crate::core::error::{Result, ScoreError};
use crate::core::regressor::LinearRegressor;
use crate::core::rules::{apply_clauses, inference_rules, ScorePair};
use crate::core::schema::FeatureRow;

/// The persisted fitted {encoder, regressor} pair, plus identity metadata.
///
/// Created once by a training run and never mutated afterwards; the
/// serving path loads it wholesale at startup and shares it read-only.
/// A new training run produces a wholly new artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub id: Uuid,
    pub trained_at: DateTime<Utc>,
    pub encoder: FeatureEncoder,
    pub regressor: LinearRegressor,
}

impl ModelArtifact {
    pub fn new(encoder: FeatureEncoder, regressor: LinearRegressor) -> Self {
        ModelArtifact {
            id: Uuid::new_v4(),
            trained_at: Utc::now(),
            encoder,
            regressor,
        }
    }

    /// The regressor's raw prediction for one row, clamped into [1, 99]
    /// before any rule runs (the regressor does not respect the score
    /// domain).
    pub fn predict_base(&self, row: &FeatureRow) -> ScorePair {
        let encoded = self.encoder.transform(row);
        let [happy, cheat] = self.regressor.predict(&encoded);
        ScorePair::new(happy, cheat).clamp()
    }

    /// Final reported scores: base prediction adjusted by the
    /// inference-time rule sequence.
    pub fn score(&self, row: &FeatureRow) -> ScorePair {
        apply_clauses(row, self.predict_base(row), &inference_rules())
    }

    /// Write the artifact wholesale as one JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load an artifact written by a previous training run.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScoreError::ArtifactNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ScoreError::ArtifactCorrupt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::neutral_row;
    use std::path::PathBuf;

    fn fitted_artifact() -> ModelArtifact {
        let mut a = neutral_row();
        a.behaviour = "kind".to_string();
        a.age = 25;
        let mut b = neutral_row();
        b.behaviour = "distant".to_string();
        b.age = 35;
        let rows = vec![a, b];

        let encoder = FeatureEncoder::fit(&rows).unwrap();
        let x = encoder.transform_all(&rows);
        let y = vec![[60.0, 30.0], [40.0, 50.0]];
        let regressor =
            LinearRegressor::fit(&x, &y, &crate::core::regressor::FitOptions::default());
        ModelArtifact::new(encoder, regressor)
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("amorcast-{}-{}.json", name, Uuid::new_v4()))
    }

    #[test]
    fn test_save_load_round_trip() {
        let artifact = fitted_artifact();
        let path = scratch_path("roundtrip");
        artifact.save(&path).unwrap();

        let loaded = ModelArtifact::load(&path).unwrap();
        assert_eq!(loaded.id, artifact.id);
        let row = neutral_row();
        assert_eq!(loaded.score(&row), artifact.score(&row));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_artifact() {
        let path = scratch_path("missing");
        match ModelArtifact::load(&path) {
            Err(ScoreError::ArtifactNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_load_corrupt_artifact() {
        let path = scratch_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ModelArtifact::load(&path),
            Err(ScoreError::ArtifactCorrupt(_))
        ));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_base_prediction_is_clamped() {
        let artifact = fitted_artifact();
        let base = artifact.predict_base(&neutral_row());
        assert!(base.happy >= 1.0 && base.happy <= 99.0);
        assert!(base.cheat >= 1.0 && base.cheat <= 99.0);
    }

    #[test]
    fn test_score_applies_inference_rules_on_top_of_base() {
        let artifact = fitted_artifact();
        let mut row = neutral_row();
        row.body_count = 25;
        let scored = artifact.score(&row);
        // The body-count floor must dominate whatever the regressor says.
        assert!(scored.cheat >= 90.0);
    }
}
