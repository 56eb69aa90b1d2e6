//! The boosting loop: one ensemble entry per round.
use crate::config::ModelConfig;
use crate::data_handling::Dataset;
use crate::ensemble::Ensemble;
use crate::error::BoostError;
use crate::models::factory;
use crate::signal::Signal;
use crate::watcher::{Watched, Watcher};
use crate::weights::{init_weights, update_weights};

/// Run one AdaBoost training run and return the populated ensemble.
///
/// Each round reweights `dtrain` with the current weight vector, fits one
/// base model with `train_budget` internal iterations and the round index
/// as its seed, derives the round's `alpha` from the weighted error of the
/// model's own bipolar predictions, and appends the model to the ensemble.
/// Rounds are strictly sequential: round `r + 1`'s weights derive from
/// round `r`'s predictions.
///
/// Every trained model is re-wrapped through a serialize/deserialize round
/// trip before it is kept, so the in-memory ensemble behaves identically to
/// one reloaded from disk.
///
/// `watchlist` entries referencing [`crate::watcher::WatchTarget::Train`]
/// reuse the loop's own predictions; holdout entries run their own
/// inference pass per round.
pub fn train(
    rounds: usize,
    params: &ModelConfig,
    dtrain: &mut Dataset,
    train_budget: u32,
    watchlist: Vec<Watched>,
    sig: Signal,
) -> Result<Ensemble, BoostError> {
    let driver = factory::driver_for(params.model_type.tag())?;
    dtrain.log_input_data_summary();

    // boundary encoding is 0/1; the boosting math runs on bipolar labels
    let groundtruth: Vec<f32> = dtrain.labels().iter().map(|&l| l * 2.0 - 1.0).collect();

    let mut weights = init_weights(dtrain.num_rows());
    let mut ensemble = Ensemble::new(driver, sig);
    let mut watcher = Watcher::new(sig, watchlist);

    for round in 0..rounds {
        dtrain.set_weights(&weights)?;

        let model = driver.train(dtrain, params, train_budget, round as u64)?;
        let raw = model.predict(dtrain)?;
        let prediction = sig.apply_all(&raw);

        // normalize: keep the deserialized form of the model, never the
        // freshly trained in-memory one
        let model = driver.from_bytes(&model.to_bytes()?)?;

        let (alpha, new_weights) = update_weights(&weights, &prediction, &groundtruth)?;
        weights = new_weights;
        log::debug!("round {}: alpha = {}", round, alpha);

        watcher.update(round, alpha, model.as_ref(), dtrain, Some(prediction.as_slice()))?;
        ensemble.add(alpha, model);
    }

    Ok(ensemble)
}
