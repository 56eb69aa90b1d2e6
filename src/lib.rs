//! adaboost-core: AdaBoost-style ensembling over an external base learner.
//!
//! This crate orchestrates binary-classification boosting: it trains a
//! sequence of weighted base models on reweighted views of one dataset,
//! combines their bipolar votes into a single strong classifier, and
//! persists/restores the resulting ensemble. The base learner itself is
//! opaque and consumed through the narrow `models::learner` contract; the
//! one bundled implementation wraps the `gbdt` crate.
//!
//! The design favors small, testable modules: weight bookkeeping, the
//! signal function, the ensemble container, and the per-round evaluator
//! each live on their own and are wired together by `trainer::train`.
pub mod config;
pub mod data_handling;
pub mod ensemble;
pub mod error;
pub mod models;
pub mod signal;
pub mod stats;
pub mod trainer;
pub mod watcher;
pub mod weights;
