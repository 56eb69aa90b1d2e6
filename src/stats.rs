//! Evaluation primitives used by the per-round watcher.

/// Area under the ROC curve via the trapezoidal rule, with tie handling.
///
/// `labels` uses the crate's 0/1 boundary encoding (1 = positive); `scores`
/// is index-aligned and may be on any monotone scale, including the
/// watcher's accumulated signed sums. Returns 0.5 when only one class is
/// present.
///
/// # Panics
///
/// Panics if `labels` and `scores` have different lengths or if a score is
/// NaN (accumulated alphas may be infinite, never NaN, by construction).
pub fn auc_score(labels: &[f32], scores: &[f64]) -> f64 {
    assert_eq!(
        labels.len(),
        scores.len(),
        "labels and scores must have equal lengths"
    );

    let total_pos = labels.iter().filter(|&&l| l == 1.0).count() as f64;
    let total_neg = labels.len() as f64 - total_pos;
    if total_pos == 0.0 || total_neg == 0.0 {
        return 0.5;
    }

    // Sort by ascending score; trapezoids between distinct score values
    // handle tied scores correctly.
    let mut combined: Vec<(f64, f32)> = scores.iter().copied().zip(labels.iter().copied()).collect();
    combined.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("NaN score in AUC input"));

    let mut auc = 0.0;
    let mut cum_pos = 0.0;
    let mut cum_neg = 0.0;
    let mut prev_score = f64::NEG_INFINITY;
    let mut prev_pos = 0.0;
    let mut prev_neg = 0.0;

    for (score, label) in combined {
        if score != prev_score {
            auc += (cum_pos - prev_pos) * (cum_neg + prev_neg) / 2.0;
            prev_score = score;
            prev_pos = cum_pos;
            prev_neg = cum_neg;
        }
        if label == 1.0 {
            cum_pos += 1.0;
        } else {
            cum_neg += 1.0;
        }
    }

    auc += (total_pos - prev_pos) * (total_neg + prev_neg) / 2.0;
    auc / (total_pos * total_neg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_separation_scores_one() {
        let labels = [0.0, 0.0, 1.0, 1.0];
        let scores = [-2.0, -1.0, 1.0, 2.0];
        assert!((auc_score(&labels, &scores) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverted_separation_scores_zero() {
        let labels = [1.0, 1.0, 0.0, 0.0];
        let scores = [-2.0, -1.0, 1.0, 2.0];
        assert!(auc_score(&labels, &scores).abs() < 1e-12);
    }

    #[test]
    fn all_tied_scores_half() {
        let labels = [1.0, 0.0, 1.0, 0.0];
        let scores = [0.3, 0.3, 0.3, 0.3];
        assert!((auc_score(&labels, &scores) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_half() {
        assert_eq!(auc_score(&[1.0, 1.0], &[0.1, 0.2]), 0.5);
        assert_eq!(auc_score(&[0.0, 0.0], &[0.1, 0.2]), 0.5);
    }

    #[test]
    fn one_ranking_error() {
        // positives {0.8, 0.4}, negatives {0.6, 0.2}: one of four pairs
        // misordered -> AUC = 0.75
        let labels = [1.0, 0.0, 1.0, 0.0];
        let scores = [0.8, 0.6, 0.4, 0.2];
        assert!((auc_score(&labels, &scores) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn infinite_scores_are_ranked_not_rejected() {
        let labels = [1.0, 0.0];
        let scores = [f64::INFINITY, f64::NEG_INFINITY];
        assert!((auc_score(&labels, &scores) - 1.0).abs() < 1e-12);
    }
}
