//! The dataset handle consumed by the boosting loop and base learners.
//!
//! A `Dataset` is a fixed-size collection of examples: a dense feature
//! matrix, 0/1 ground-truth labels, and mutable non-negative per-example
//! weights. Labels stay 0/1 at this boundary; the trainer and evaluator map
//! them to bipolar form internally.
use ndarray::Array2;

use crate::error::BoostError;

/// Representation tag for dense in-memory feature matrices. The bundled
/// GBDT driver consumes this representation.
pub const DENSE_DTYPE: &str = "dense";

#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f32>,
    labels: Vec<f32>,
    weights: Vec<f64>,
    dtype: String,
}

impl Dataset {
    /// Create a dense dataset. Labels must be 0 or 1, one per row of `x`.
    /// Weights start uniform at 1.
    pub fn new(x: Array2<f32>, labels: Vec<f32>) -> Result<Self, BoostError> {
        if labels.len() != x.nrows() {
            return Err(BoostError::LengthMismatch {
                expected: x.nrows(),
                found: labels.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(BoostError::InvalidData("dataset has no rows".to_string()));
        }
        if let Some(bad) = labels.iter().find(|&&l| l != 0.0 && l != 1.0) {
            return Err(BoostError::InvalidData(format!(
                "labels must be 0 or 1, found {}",
                bad
            )));
        }
        let n = x.nrows();
        Ok(Dataset {
            x,
            labels,
            weights: vec![1.0; n],
            dtype: DENSE_DTYPE.to_string(),
        })
    }

    pub fn num_rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> &Array2<f32> {
        &self.x
    }

    /// Ground-truth labels in the crate's 0/1 boundary encoding.
    pub fn labels(&self) -> &[f32] {
        &self.labels
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Name of the underlying representation; checked against the
    /// ensemble's base-learner type before prediction.
    pub fn dtype(&self) -> &str {
        &self.dtype
    }

    /// Tag this dataset as a non-dense representation. Loaders for other
    /// base-learner families mark their output so `Ensemble::predict` can
    /// reject mismatched data.
    pub fn with_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.dtype = dtype.into();
        self
    }

    /// Replace the per-example weights. Length must match the dataset and
    /// every weight must be non-negative.
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<(), BoostError> {
        if weights.len() != self.num_rows() {
            return Err(BoostError::LengthMismatch {
                expected: self.num_rows(),
                found: weights.len(),
            });
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(BoostError::InvalidData(format!(
                "weights must be finite and non-negative, found {}",
                bad
            )));
        }
        self.weights.clear();
        self.weights.extend_from_slice(weights);
        Ok(())
    }

    pub fn log_input_data_summary(&self) {
        log::info!(
            "dataset: {} examples ({} positive, {} negative), {} features",
            self.num_rows(),
            self.labels.iter().filter(|&&l| l == 1.0).count(),
            self.labels.iter().filter(|&&l| l == 0.0).count(),
            self.num_features()
        );
    }
}
