//! The narrow contract the boosting core consumes base learners through.
//!
//! Two seams: a [`LearnerDriver`] is the per-type capability set (train a
//! model, decode one from bytes or a file), and a [`BoostedModel`] is one
//! trained model handle (score a dataset, encode itself). The core is
//! polymorphic over these traits; in practice one concrete driver is active
//! per ensemble, recorded by its tag in the persisted manifest.
use std::path::Path;

use crate::config::ModelConfig;
use crate::data_handling::Dataset;
use crate::error::BoostError;

/// One trained base model.
pub trait BoostedModel {
    /// Raw real-valued scores, one per example, in dataset order.
    fn predict(&self, data: &Dataset) -> Result<Vec<f32>, BoostError>;

    /// Encode the model to a byte blob. Decoding the blob through the
    /// owning driver's `from_bytes` must not change predictive behavior.
    fn to_bytes(&self) -> Result<Vec<u8>, BoostError>;

    /// Write the model to a file, in the same encoding as `to_bytes`.
    fn save(&self, path: &Path) -> Result<(), BoostError>;
}

/// The capability set for one concrete base-learner type.
///
/// Drivers are stateless; they are registered once in
/// [`crate::models::factory`] and looked up by tag.
pub trait LearnerDriver: Sync {
    /// Tag recorded in persisted manifests for this learner type.
    fn tag(&self) -> &'static str;

    /// Dataset representation this learner consumes (checked against
    /// `Dataset::dtype` before prediction).
    fn dtype(&self) -> &'static str;

    /// Fit one model on the dataset's current weights. `budget` is the
    /// learner's internal iteration count; `seed` ties the round to a
    /// reproducible source of randomness for learners that use one.
    fn train(
        &self,
        data: &Dataset,
        params: &ModelConfig,
        budget: u32,
        seed: u64,
    ) -> Result<Box<dyn BoostedModel>, BoostError>;

    fn from_bytes(&self, blob: &[u8]) -> Result<Box<dyn BoostedModel>, BoostError>;

    fn load(&self, path: &Path) -> Result<Box<dyn BoostedModel>, BoostError>;
}
