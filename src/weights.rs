//! Per-example boosting weights: uniform initialization and the AdaBoost
//! exponential update.
use crate::error::BoostError;

/// Uniform weight vector of `n` ones. `n` must be at least 1.
pub fn init_weights(n: usize) -> Vec<f64> {
    assert!(n >= 1, "weight vector needs at least one example");
    vec![1.0; n]
}

/// One AdaBoost weight update.
///
/// `prediction` and `groundtruth` are bipolar (-1/+1) and index-aligned with
/// `weights`. Returns `(alpha, new_weights)` where
/// `alpha = 0.5 * ln((1 - e) / e)` for the weighted misclassification rate
/// `e`, and `new_weights[i] = weights[i] * exp(-alpha * p[i] * g[i])`.
///
/// Degenerate rounds are representable, not errors: `e = 0` yields
/// `alpha = +inf` (weights of correct examples collapse to 0), `e = 1`
/// yields `alpha = -inf`, and `e = 0.5` yields `alpha = 0` (the round
/// contributes nothing). The input vector is never aliased or mutated.
pub fn update_weights(
    weights: &[f64],
    prediction: &[f32],
    groundtruth: &[f32],
) -> Result<(f64, Vec<f64>), BoostError> {
    if prediction.len() != weights.len() {
        return Err(BoostError::LengthMismatch {
            expected: weights.len(),
            found: prediction.len(),
        });
    }
    if groundtruth.len() != weights.len() {
        return Err(BoostError::LengthMismatch {
            expected: weights.len(),
            found: groundtruth.len(),
        });
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return Err(BoostError::InvalidData(
            "weight vector sums to zero".to_string(),
        ));
    }

    let missed = weights
        .iter()
        .zip(prediction.iter().zip(groundtruth.iter()))
        .filter(|(_, (p, g))| p != g)
        .fold(0.0f64, |acc, (w, _)| acc + w);
    // a perfect round must divide as exactly +0.0, never -0.0: the sum of an
    // empty set of weights would otherwise drag ln((1 - e) / e) to NaN
    // instead of +inf
    let e = if missed == 0.0 { 0.0 } else { missed / total };
    let alpha = 0.5 * ((1.0 - e) / e).ln();

    let new_weights = weights
        .iter()
        .zip(prediction.iter().zip(groundtruth.iter()))
        .map(|(w, (p, g))| w * (-alpha * f64::from(p * g)).exp())
        .collect();

    Ok((alpha, new_weights))
}
