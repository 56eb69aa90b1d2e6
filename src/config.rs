use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hyperparameters handed to the base learner on every boosting round.
///
/// The number of internal boosting iterations (the training budget) is not
/// part of this config; it is passed explicitly to [`crate::trainer::train`]
/// so one config can be reused across runs with different budgets.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub learning_rate: f32,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported base-learner types and their hyperparameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    GBDT {
        max_depth: u32,
        debug: bool,
        training_optimization_level: u8,
        loss_type: String,
    },
}

impl ModelType {
    /// The tag string recorded in persisted manifests for this type.
    pub fn tag(&self) -> &'static str {
        match self {
            ModelType::GBDT { .. } => "gbdt",
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::GBDT {
            max_depth: 6,
            debug: false,
            training_optimization_level: 2,
            loss_type: "LogLikelyhood".to_string(),
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gbdt" => Ok(ModelType::default()),
            _ => Err(format!("Unknown model type: {}", s)),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f32, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}
