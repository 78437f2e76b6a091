//! Adaptive learning stack for warlord power estimation.
//!
//! This crate holds everything between the feature extractor and the engine
//! facade:
//!
//! - [`corpus`]: the bounded, append-only store of learning examples
//! - [`model`]: the opaque regression capability trait ([`PowerModel`])
//! - [`forest`]: a bagged regression forest implementing that trait
//! - [`split`]: deterministic holdout partitioning for retrain evaluation
//! - [`estimator`]: the trained/untrained state machine over a model
//!
//! # Retrain Protocol
//!
//! Every observed score triggers a full re-fit over the retained window.
//! Below 5 examples the estimator declines to fit at all; above 10 it holds
//! out a deterministic 20% of the corpus, fits the deployed model on the
//! remaining 80%, and logs mean squared error and R² on the held-out rows.
//! The evaluation never leaks into the deployed fit and its metrics are never
//! returned to callers.

pub use self::corpus::{CORPUS_CAPACITY, LearningCorpus, LearningExample};
pub use self::estimator::{
    HOLDOUT_THRESHOLD, MIN_TRAINING_EXAMPLES, PowerEstimator, SPLIT_SEED,
};
pub use self::forest::{ForestConfig, RegressionForest};
pub use self::model::PowerModel;

pub mod corpus;
pub mod estimator;
pub mod forest;
pub mod model;
pub mod split;
