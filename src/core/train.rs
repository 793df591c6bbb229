use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::artifact::ModelArtifact;
use crate::core::encoder::FeatureEncoder;
use crate::core::error::{Result, ScoreError};
use crate::core::labels::{synthesize, LabeledRow};
use crate::core::regressor::{FitOptions, LinearRegressor};

#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Fraction of the corpus held out for evaluation.
    pub holdout_fraction: f64,
    /// Shuffle seed. A fixed seed makes the whole run reproducible.
    pub seed: u64,
    pub fit: FitOptions,
}

impl Default for TrainOptions {
    fn default() -> Self {
        TrainOptions {
            holdout_fraction: 0.2,
            seed: 42,
            fit: FitOptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub total_rows: usize,
    pub train_rows: usize,
    pub holdout_rows: usize,
    /// Mean absolute error on the holdout partition, per output
    /// (happy, cheat), measured on clamped base predictions. None when
    /// the corpus was too small to hold anything out.
    pub holdout_mae: Option<[f64; 2]>,
}

/// One-shot batch training: synthesize labels, split, fit the encoder and
/// regressor on the training partition, and assemble a fresh artifact.
///
/// Any failure produces no artifact at all; there is no partial progress.
pub fn train(rows: Vec<LabeledRow>, options: &TrainOptions) -> Result<(ModelArtifact, TrainReport)> {
    if rows.is_empty() {
        return Err(ScoreError::EmptyCorpus);
    }

    // Label synthesis runs before any encoding or fitting.
    let labeled = synthesize(rows);
    let total_rows = labeled.len();

    let mut indices: Vec<usize> = (0..total_rows).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(options.seed));

    let holdout_len = ((total_rows as f64) * options.holdout_fraction).round() as usize;
    // Never hold out the whole corpus.
    let holdout_len = holdout_len.min(total_rows.saturating_sub(1));
    let (holdout_idx, train_idx) = indices.split_at(holdout_len);

    let train_features: Vec<_> = train_idx.iter().map(|&i| labeled[i].row.clone()).collect();
    let train_targets: Vec<[f64; 2]> = train_idx
        .iter()
        .map(|&i| [labeled[i].target.happy, labeled[i].target.cheat])
        .collect();

    let encoder = FeatureEncoder::fit(&train_features)?;
    let x = encoder.transform_all(&train_features);
    let regressor = LinearRegressor::fit(&x, &train_targets, &options.fit);
    let artifact = ModelArtifact::new(encoder, regressor);

    let holdout_mae = if holdout_idx.is_empty() {
        None
    } else {
        let mut abs_err = [0.0_f64; 2];
        for &i in holdout_idx {
            let base = artifact.predict_base(&labeled[i].row);
            abs_err[0] += (base.happy - labeled[i].target.happy).abs();
            abs_err[1] += (base.cheat - labeled[i].target.cheat).abs();
        }
        let n = holdout_idx.len() as f64;
        Some([abs_err[0] / n, abs_err[1] / n])
    };

    let report = TrainReport {
        total_rows,
        train_rows: train_idx.len(),
        holdout_rows: holdout_idx.len(),
        holdout_mae,
    };

    Ok((artifact, report))
}
