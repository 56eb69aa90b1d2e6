use std::fs;
use std::path::Path;

use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;

use crate::config::{ModelConfig, ModelType};
use crate::data_handling::{Dataset, DENSE_DTYPE};
use crate::error::BoostError;
use crate::models::learner::{BoostedModel, LearnerDriver};

/// Driver for the `gbdt` crate's gradient-boosted trees.
///
/// Models are persisted as the serde-JSON encoding of the underlying `GBDT`
/// value, so the byte-blob and file forms are interchangeable.
pub struct GbdtDriver;

pub struct GbdtModel {
    model: GBDT,
}

impl BoostedModel for GbdtModel {
    fn predict(&self, data: &Dataset) -> Result<Vec<f32>, BoostError> {
        let x = data.features();
        let mut test_x = DataVec::new();
        for row in 0..x.nrows() {
            test_x.push(Data::new_test_data(x.row(row).to_vec(), None));
        }
        Ok(self.model.predict(&test_x))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, BoostError> {
        Ok(serde_json::to_vec(&self.model)?)
    }

    fn save(&self, path: &Path) -> Result<(), BoostError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

impl LearnerDriver for GbdtDriver {
    fn tag(&self) -> &'static str {
        "gbdt"
    }

    fn dtype(&self) -> &'static str {
        DENSE_DTYPE
    }

    fn train(
        &self,
        data: &Dataset,
        params: &ModelConfig,
        budget: u32,
        seed: u64,
    ) -> Result<Box<dyn BoostedModel>, BoostError> {
        let ModelType::GBDT {
            max_depth,
            debug,
            training_optimization_level,
            loss_type,
        } = &params.model_type;

        // GBDT training is deterministic; the seed is accepted for contract
        // parity with learners that randomize.
        log::debug!("fitting gbdt: budget={}, seed={}", budget, seed);

        let mut config = Config::new();
        config.set_feature_size(data.num_features());
        config.set_shrinkage(params.learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(budget as usize);
        config.set_debug(*debug);
        config.set_training_optimization_level(*training_optimization_level);
        config.set_loss(loss_type);

        let mut gbdt = GBDT::new(&config);

        let x = data.features();
        let labels = data.labels();
        let weights = data.weights();
        let mut train_x = DataVec::new();
        for row in 0..x.nrows() {
            // LogLikelyhood expects bipolar labels; the dataset boundary is 0/1
            let label = labels[row] * 2.0 - 1.0;
            train_x.push(Data::new_training_data(
                x.row(row).to_vec(),
                weights[row] as f32,
                label,
                None,
            ));
        }

        gbdt.fit(&mut train_x);

        Ok(Box::new(GbdtModel { model: gbdt }))
    }

    fn from_bytes(&self, blob: &[u8]) -> Result<Box<dyn BoostedModel>, BoostError> {
        let model: GBDT = serde_json::from_slice(blob)?;
        Ok(Box::new(GbdtModel { model }))
    }

    fn load(&self, path: &Path) -> Result<Box<dyn BoostedModel>, BoostError> {
        let blob = fs::read(path)?;
        self.from_bytes(&blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn separable_dataset() -> Dataset {
        // second feature mirrors the label
        let x = Array2::from_shape_vec(
            (8, 2),
            vec![
                0.1, 1.0, 0.4, 0.0, 0.6, 1.0, 0.9, 0.0, 1.2, 1.0, 1.5, 0.0, 1.8, 1.0, 2.1, 0.0,
            ],
        )
        .unwrap();
        let y = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn train_predict_and_byte_round_trip() {
        let data = separable_dataset();
        let driver = GbdtDriver;
        let model = driver
            .train(&data, &ModelConfig::default(), 4, 0)
            .unwrap();

        let preds = model.predict(&data).unwrap();
        assert_eq!(preds.len(), data.num_rows());

        let restored = driver.from_bytes(&model.to_bytes().unwrap()).unwrap();
        let preds2 = restored.predict(&data).unwrap();
        for (a, b) in preds.iter().zip(preds2.iter()) {
            assert!((a - b).abs() < 1e-6, "round-trip changed {} into {}", a, b);
        }
    }

    #[test]
    fn weighted_training_respects_weights() {
        let mut data = separable_dataset();
        // zeroing half the examples must still produce a usable model
        data.set_weights(&[1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0])
            .unwrap();
        let driver = GbdtDriver;
        let model = driver
            .train(&data, &ModelConfig::default(), 3, 1)
            .unwrap();
        assert_eq!(model.predict(&data).unwrap().len(), 8);
    }
}
