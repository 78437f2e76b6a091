//! The estimation engine facade.

use std::collections::BTreeMap;

use serde::Serialize;
use warlord_evaluator::{FeatureExtractor, MalformedRecordError};
use warlord_learn::{LearningCorpus, LearningExample, PowerEstimator, RegressionForest};
use warlord_record::CharacterRecord;

use crate::{
    diagnostics::EngineDiagnostics,
    storage::{EngineStorage, StorageError},
};

/// An estimation call failed.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum EngineError {
    /// The record was rejected during feature extraction; nothing was
    /// mutated or persisted.
    #[display("malformed record: {_0}")]
    Malformed(MalformedRecordError),
    /// A durable blob could not be written; the in-memory state is ahead of
    /// the durable state, so the caller should retry the mutating call or
    /// accept losing it on crash.
    #[display("storage failure: {_0}")]
    Storage(StorageError),
}

/// Result bundle of one estimation call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerEstimate {
    pub estimated_power: i64,
    pub feature_importance: BTreeMap<String, f32>,
    pub learning_data_count: usize,
    pub is_trained: bool,
}

/// Process-wide estimation engine over one data directory.
///
/// Holds the learning corpus and the estimator, loaded once at construction
/// and written back after every mutating call. Synchronous and not
/// reentrant-safe; callers serialize access. Multiple engines over separate
/// data directories are fully independent.
#[derive(Debug)]
pub struct PowerEngine {
    extractor: FeatureExtractor,
    corpus: LearningCorpus,
    estimator: PowerEstimator<RegressionForest>,
    storage: EngineStorage,
}

impl PowerEngine {
    /// Opens an engine over a data directory, loading the corpus and model
    /// blobs. A missing or unreadable blob means "start empty / untrained",
    /// never an error.
    #[must_use]
    pub fn open(data_dir: impl Into<std::path::PathBuf>) -> Self {
        let storage = EngineStorage::new(data_dir);
        let corpus = storage.load_corpus();
        let estimator = match storage.load_model() {
            Some(model) => PowerEstimator::trained(model),
            None => PowerEstimator::untrained(RegressionForest::default()),
        };
        Self {
            extractor: FeatureExtractor::new(),
            corpus,
            estimator,
            storage,
        }
    }

    /// Estimates the power score for a record.
    ///
    /// When an observed score is supplied the corpus gains an example, a
    /// retrain is attempted, and the corpus blob (plus, after a successful
    /// retrain, the model blob) is rewritten before predicting, so the
    /// returned estimate reflects the post-retrain state. Calls without an
    /// observed score mutate and persist nothing.
    ///
    /// # Errors
    ///
    /// [`EngineError::Malformed`] if extraction rejects the record (the call
    /// aborts before any mutation); [`EngineError::Storage`] if a blob write
    /// fails.
    pub fn estimate(
        &mut self,
        record: &CharacterRecord,
        observed_score: Option<f32>,
    ) -> Result<PowerEstimate, EngineError> {
        if let Some(score) = observed_score {
            self.learn(record, score)?;
        }

        let estimated_power = self.estimator.predict(record)?;
        Ok(PowerEstimate {
            estimated_power,
            feature_importance: self.estimator.importances(),
            learning_data_count: self.corpus.len(),
            is_trained: self.estimator.is_trained(),
        })
    }

    /// Current learning state without running an estimate.
    #[must_use]
    pub fn diagnostics(&self) -> EngineDiagnostics {
        EngineDiagnostics {
            is_trained: self.estimator.is_trained(),
            corpus_size: self.corpus.len(),
            feature_importance: self.estimator.importances(),
        }
    }

    fn learn(&mut self, record: &CharacterRecord, score: f32) -> Result<(), EngineError> {
        let features = self.extractor.extract(record)?;
        self.corpus.append(LearningExample {
            features,
            observed_score: score,
            source_record: record.clone(),
        });
        self.estimator.mark_stale();
        let retrained = self.estimator.retrain(&self.corpus);

        self.storage.save_corpus(&self.corpus)?;
        if retrained {
            self.storage.save_model(self.estimator.model())?;
        }
        Ok(())
    }
}
