//! The signal function: raw base-learner scores to bipolar labels.

/// Maps a real-valued base-learner score to a bipolar label in {-1, +1}.
///
/// Every component that thresholds scores takes a `Signal` at construction;
/// there is no shared implicit default. The same value must be used for
/// training and for inference, and it is not recorded in the persisted
/// manifest — callers reloading an ensemble must supply the signal that was
/// used at training time (see `Ensemble::load`).
#[derive(Clone, Copy)]
pub struct Signal {
    f: fn(f32) -> f32,
}

impl Signal {
    pub fn new(f: fn(f32) -> f32) -> Self {
        Signal { f }
    }

    pub fn apply(&self, score: f32) -> f32 {
        (self.f)(score)
    }

    pub fn apply_all(&self, scores: &[f32]) -> Vec<f32> {
        scores.iter().map(|&s| (self.f)(s)).collect()
    }
}

impl Default for Signal {
    /// Threshold at 0.5: scores above 0.5 map to +1, everything else to -1.
    /// Matches probability-scale base-learner outputs.
    fn default() -> Self {
        Signal::new(|score| if score > 0.5 { 1.0 } else { -1.0 })
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Signal(fn)")
    }
}
