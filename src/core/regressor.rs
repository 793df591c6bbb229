use serde::{Deserialize, Serialize};

/// Training hyperparameters. Fixed defaults keep a training run fully
/// deterministic: same matrix in, same weights out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOptions {
    pub epochs: usize,
    pub learning_rate: f64,
    pub l2: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            epochs: 500,
            learning_rate: 0.1,
            l2: 0.001,
        }
    }
}

/// Two-output linear regressor: one weight vector and bias per output,
/// fit by full-batch gradient descent on standardized features.
///
/// This is the crate's stand-in for the "trainable regressor" capability.
/// The rest of the pipeline depends only on fit and predict, so any
/// regression algorithm honoring that contract could replace it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    /// weights[output][feature]
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

pub const OUTPUTS: usize = 2;

impl LinearRegressor {
    /// Fit on an encoded matrix `x` against two-column targets `y`.
    ///
    /// Expects `x` non-empty with uniform row width and `y.len() == x.len()`.
    pub fn fit(x: &[Vec<f64>], y: &[[f64; OUTPUTS]], options: &FitOptions) -> Self {
        let n = x.len();
        let width = x.first().map(|r| r.len()).unwrap_or(0);
        let mut weights = vec![vec![0.0; width]; OUTPUTS];
        // Start each bias at the target mean so early epochs correct
        // shape, not offset.
        let mut bias: Vec<f64> = (0..OUTPUTS)
            .map(|o| y.iter().map(|t| t[o]).sum::<f64>() / n.max(1) as f64)
            .collect();

        if n == 0 || width == 0 {
            return LinearRegressor { weights, bias };
        }

        let scale = 1.0 / n as f64;
        for _ in 0..options.epochs {
            for o in 0..OUTPUTS {
                let mut grad_w = vec![0.0; width];
                let mut grad_b = 0.0;
                for (row, target) in x.iter().zip(y) {
                    let err = dot(&weights[o], row) + bias[o] - target[o];
                    for (g, v) in grad_w.iter_mut().zip(row) {
                        *g += err * v;
                    }
                    grad_b += err;
                }
                for (w, g) in weights[o].iter_mut().zip(&grad_w) {
                    *w -= options.learning_rate * (g * scale + options.l2 * *w);
                }
                bias[o] -= options.learning_rate * grad_b * scale;
            }
        }

        LinearRegressor { weights, bias }
    }

    /// Raw two-output prediction. Not bounded to the score domain; the
    /// caller clamps.
    pub fn predict(&self, x: &[f64]) -> [f64; OUTPUTS] {
        [
            dot(&self.weights[0], x) + self.bias[0],
            dot(&self.weights[1], x) + self.bias[1],
        ]
    }
}

fn dot(weights: &[f64], x: &[f64]) -> f64 {
    weights.iter().zip(x).map(|(w, v)| w * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_linear_relationship() {
        // y0 = 10 + 2a - b, y1 = 5 + 3b over a small grid.
        let mut x = Vec::new();
        let mut y = Vec::new();
        for a in -3..=3 {
            for b in -3..=3 {
                let (a, b) = (a as f64, b as f64);
                x.push(vec![a, b]);
                y.push([10.0 + 2.0 * a - b, 5.0 + 3.0 * b]);
            }
        }

        let model = LinearRegressor::fit(&x, &y, &FitOptions::default());
        let pred = model.predict(&[1.0, 2.0]);
        assert!((pred[0] - 10.0).abs() < 0.5, "pred[0] = {}", pred[0]);
        assert!((pred[1] - 11.0).abs() < 0.5, "pred[1] = {}", pred[1]);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
        let y = vec![[1.0, 2.0], [2.0, 1.0], [3.0, 3.0]];
        let a = LinearRegressor::fit(&x, &y, &FitOptions::default());
        let b = LinearRegressor::fit(&x, &y, &FitOptions::default());
        assert_eq!(a.predict(&[0.5, 0.5]), b.predict(&[0.5, 0.5]));
    }

    #[test]
    fn test_constant_targets_predict_the_constant() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![[40.0, 60.0]; 3];
        let model = LinearRegressor::fit(&x, &y, &FitOptions::default());
        let pred = model.predict(&[1.0]);
        assert!((pred[0] - 40.0).abs() < 0.5);
        assert!((pred[1] - 60.0).abs() < 0.5);
    }
}
