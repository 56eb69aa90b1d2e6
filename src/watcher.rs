//! Per-round evaluation of tracked datasets during training.
//!
//! The watcher keeps one running accumulated signed-score vector per
//! watched dataset and reports incremental error rate and AUC after every
//! boosting round. It is purely observational; nothing here feeds back into
//! training. The accumulation is mutated in place round over round, which
//! keeps reporting linear in the number of rounds.
use crate::data_handling::Dataset;
use crate::error::BoostError;
use crate::models::learner::BoostedModel;
use crate::signal::Signal;
use crate::stats::auc_score;

/// What a watchlist entry points at. The live training dataset is watched
/// through [`WatchTarget::Train`] so the trainer's already-computed
/// predictions can be reused instead of re-running inference; evaluation
/// datasets are owned by the watcher for the run's duration.
pub enum WatchTarget {
    Train,
    Holdout(Dataset),
}

pub struct Watched {
    pub target: WatchTarget,
    pub tag: String,
}

impl Watched {
    pub fn train(tag: impl Into<String>) -> Self {
        Watched {
            target: WatchTarget::Train,
            tag: tag.into(),
        }
    }

    pub fn holdout(dataset: Dataset, tag: impl Into<String>) -> Self {
        Watched {
            target: WatchTarget::Holdout(dataset),
            tag: tag.into(),
        }
    }
}

pub struct Watcher {
    sig: Signal,
    watchlist: Vec<Watched>,
    /// Running accumulated signed scores, one vector per watched dataset;
    /// `None` until the first round.
    preds: Vec<Option<Vec<f64>>>,
}

impl Watcher {
    pub fn new(sig: Signal, watchlist: Vec<Watched>) -> Self {
        let n = watchlist.len();
        Watcher {
            sig,
            watchlist,
            preds: vec![None; n],
        }
    }

    /// Fold one round's model into every watched dataset's accumulation and
    /// print the round's report line.
    ///
    /// `dtrain` is the live training dataset backing [`WatchTarget::Train`]
    /// entries; `dtrain_preds`, when supplied, is the trainer's bipolar
    /// prediction vector for it and skips a redundant inference pass.
    pub fn update(
        &mut self,
        round: usize,
        alpha: f64,
        model: &dyn BoostedModel,
        dtrain: &Dataset,
        dtrain_preds: Option<&[f32]>,
    ) -> Result<(), BoostError> {
        let mut displays = Vec::with_capacity(self.watchlist.len());

        for (watch, acc) in self.watchlist.iter().zip(self.preds.iter_mut()) {
            let dataset = match &watch.target {
                WatchTarget::Train => dtrain,
                WatchTarget::Holdout(d) => d,
            };

            let bipolar: Vec<f32> = match (&watch.target, dtrain_preds) {
                (WatchTarget::Train, Some(cached)) => cached.to_vec(),
                _ => self.sig.apply_all(&model.predict(dataset)?),
            };
            if bipolar.len() != dataset.num_rows() {
                return Err(BoostError::LengthMismatch {
                    expected: dataset.num_rows(),
                    found: bipolar.len(),
                });
            }

            match acc {
                Some(sum) => {
                    for (s, &p) in sum.iter_mut().zip(bipolar.iter()) {
                        *s += f64::from(p) * alpha;
                    }
                }
                None => {
                    *acc = Some(bipolar.iter().map(|&p| f64::from(p) * alpha).collect());
                }
            }
            let sum = acc.as_ref().unwrap();

            let labels = dataset.labels();
            let errors = sum
                .iter()
                .zip(labels.iter())
                .filter(|(&s, &l)| (s > 0.0) != (l == 1.0))
                .count();
            let err = errors as f64 / labels.len() as f64;
            let auc = auc_score(labels, sum);

            displays.push(format!(
                "{}-err: {:.6}, {}-auc: {:.6}",
                watch.tag, err, watch.tag, auc
            ));
        }

        println!("[{}]\t{}", round, displays.join("\t"));
        log::debug!("round {} reported with alpha {}", round, alpha);
        Ok(())
    }
}
