//! Base-learner capability contract and concrete drivers.
pub mod factory;
pub mod gbdt;
pub mod learner;
