use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ScoreError};
use crate::core::schema::FeatureRow;

/// One-hot vocabulary for a single categorical field, learned at fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBlock {
    pub field: String,
    /// Sorted distinct values seen during fitting.
    pub vocab: Vec<String>,
}

impl CategoryBlock {
    /// Index of `value` in the vocabulary, or None for an unseen value.
    fn position(&self, value: &str) -> Option<usize> {
        self.vocab.iter().position(|v| v == value)
    }
}

/// Mean/scale standardizer for a single numeric field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaler {
    pub field: String,
    pub mean: f64,
    pub scale: f64,
}

/// Deterministic transformation of feature rows into a numeric matrix:
/// one-hot blocks for the categorical fields followed by standardized
/// numerics, in fixed field order.
///
/// Fit once on the training corpus and applied unchanged thereafter,
/// including on single rows at serving time. A categorical value never
/// seen during fitting encodes as the all-zero block for its field, so
/// out-of-vocabulary inputs transform without error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    categorical: Vec<CategoryBlock>,
    numeric: Vec<NumericScaler>,
}

impl FeatureEncoder {
    /// Learn vocabularies and standardization parameters from `rows`.
    pub fn fit(rows: &[FeatureRow]) -> Result<Self> {
        if rows.is_empty() {
            return Err(ScoreError::EmptyCorpus);
        }

        let field_count = rows[0].categorical_values().len();
        let mut categorical = Vec::with_capacity(field_count);
        for i in 0..field_count {
            let field = rows[0].categorical_values()[i].0;
            let values: BTreeSet<String> = rows
                .iter()
                .map(|r| r.categorical_values()[i].1.to_string())
                .collect();
            categorical.push(CategoryBlock {
                field: field.to_string(),
                vocab: values.into_iter().collect(),
            });
        }

        let numeric_count = rows[0].numeric_values().len();
        let mut numeric = Vec::with_capacity(numeric_count);
        let n = rows.len() as f64;
        for i in 0..numeric_count {
            let field = rows[0].numeric_values()[i].0;
            let sum: f64 = rows.iter().map(|r| r.numeric_values()[i].1).sum();
            let mean = sum / n;
            let variance: f64 = rows
                .iter()
                .map(|r| {
                    let d = r.numeric_values()[i].1 - mean;
                    d * d
                })
                .sum::<f64>()
                / n;
            let std = variance.sqrt();
            numeric.push(NumericScaler {
                field: field.to_string(),
                // Constant columns pass through unscaled.
                scale: if std > 0.0 { std } else { 1.0 },
                mean,
            });
        }

        Ok(FeatureEncoder {
            categorical,
            numeric,
        })
    }

    /// Width of the encoded vector.
    pub fn width(&self) -> usize {
        let one_hot: usize = self.categorical.iter().map(|b| b.vocab.len()).sum();
        one_hot + self.numeric.len()
    }

    /// Encode one row into a fixed-width numeric vector. Total function:
    /// never fails on a well-formed row.
    pub fn transform(&self, row: &FeatureRow) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.width());

        let values = row.categorical_values();
        for (i, block) in self.categorical.iter().enumerate() {
            let hit = block.position(values[i].1);
            for j in 0..block.vocab.len() {
                out.push(if Some(j) == hit { 1.0 } else { 0.0 });
            }
        }

        let values = row.numeric_values();
        for (i, scaler) in self.numeric.iter().enumerate() {
            out.push((values[i].1 - scaler.mean) / scaler.scale);
        }

        out
    }

    pub fn transform_all(&self, rows: &[FeatureRow]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::neutral_row;

    fn fit_rows() -> Vec<FeatureRow> {
        let mut a = neutral_row();
        a.behaviour = "kind".to_string();
        a.age = 25;
        let mut b = neutral_row();
        b.behaviour = "distant".to_string();
        b.age = 35;
        vec![a, b]
    }

    #[test]
    fn test_fit_rejects_empty_corpus() {
        assert!(matches!(
            FeatureEncoder::fit(&[]),
            Err(ScoreError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_transform_width_is_stable() {
        let rows = fit_rows();
        let encoder = FeatureEncoder::fit(&rows).unwrap();
        for row in &rows {
            assert_eq!(encoder.transform(row).len(), encoder.width());
        }
    }

    #[test]
    fn test_one_hot_is_exclusive() {
        let rows = fit_rows();
        let encoder = FeatureEncoder::fit(&rows).unwrap();
        let encoded = encoder.transform(&rows[0]);
        // 7 categorical fields, each block sums to exactly 1 for in-vocab rows.
        let one_hot_width = encoder.width() - 17;
        let block_sum: f64 = encoded[..one_hot_width].iter().sum();
        assert_eq!(block_sum, 7.0);
    }

    #[test]
    fn test_unknown_category_encodes_as_zero_block() {
        let rows = fit_rows();
        let encoder = FeatureEncoder::fit(&rows).unwrap();
        let mut unseen = neutral_row();
        unseen.behaviour = "volatile".to_string();
        let encoded = encoder.transform(&unseen);
        assert_eq!(encoded.len(), encoder.width());
        // One block contributes nothing; the other six still fire.
        let one_hot_width = encoder.width() - 17;
        let block_sum: f64 = encoded[..one_hot_width].iter().sum();
        assert_eq!(block_sum, 6.0);
    }

    #[test]
    fn test_standardization_math() {
        let rows = fit_rows();
        let encoder = FeatureEncoder::fit(&rows).unwrap();
        // Age is 25 and 35: mean 30, population std 5, so rows encode to -1 and +1.
        let scaler = encoder
            .numeric
            .iter()
            .find(|s| s.field == "Age")
            .expect("age scaler");
        assert_eq!(scaler.mean, 30.0);
        assert_eq!(scaler.scale, 5.0);

        let a = encoder.transform(&rows[0]);
        let b = encoder.transform(&rows[1]);
        let age_idx = encoder.width() - 17
            + encoder
                .numeric
                .iter()
                .position(|s| s.field == "Age")
                .unwrap();
        assert_eq!(a[age_idx], -1.0);
        assert_eq!(b[age_idx], 1.0);
    }

    #[test]
    fn test_constant_column_scale_is_one() {
        let rows = fit_rows();
        let encoder = FeatureEncoder::fit(&rows).unwrap();
        let scaler = encoder
            .numeric
            .iter()
            .find(|s| s.field == "Trust Parameter")
            .expect("trust scaler");
        assert_eq!(scaler.scale, 1.0);
    }
}
