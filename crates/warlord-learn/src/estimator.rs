//! Trained/untrained state machine over a power model.

use std::collections::BTreeMap;

use tracing::{debug, info};
use warlord_evaluator::{FeatureExtractor, FeatureVector, MalformedRecordError, baseline};
use warlord_record::CharacterRecord;

use crate::{corpus::LearningCorpus, model::PowerModel, split::holdout_split};

/// Below this corpus size a retrain is refused outright; there is not enough
/// signal to fit meaningfully.
pub const MIN_TRAINING_EXAMPLES: usize = 5;

/// Above this corpus size retrains hold out 20% of the rows for evaluation.
pub const HOLDOUT_THRESHOLD: usize = 10;

/// Seed for the holdout shuffle, fixed for reproducibility.
pub const SPLIT_SEED: u64 = 42;

const HOLDOUT_RATIO: f32 = 0.2;

/// Holds a trainable model plus its trained/untrained flag and drives the
/// retrain and prediction protocols.
///
/// The flag goes false the moment the corpus gains an example (the model is
/// stale relative to it) and true only after a successful
/// [`retrain`](Self::retrain). While untrained, predictions fall back to the
/// deterministic baseline formula.
#[derive(Debug)]
pub struct PowerEstimator<M> {
    model: M,
    trained: bool,
    extractor: FeatureExtractor,
}

impl<M: PowerModel> PowerEstimator<M> {
    /// Wraps a freshly constructed, never-fitted model.
    #[must_use]
    pub fn untrained(model: M) -> Self {
        Self {
            model,
            trained: false,
            extractor: FeatureExtractor::new(),
        }
    }

    /// Wraps a model restored from a durable blob, which is only ever
    /// written after a successful fit.
    #[must_use]
    pub fn trained(model: M) -> Self {
        Self {
            model,
            trained: true,
            extractor: FeatureExtractor::new(),
        }
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Marks the model stale. Called after every corpus append.
    pub fn mark_stale(&mut self) {
        self.trained = false;
    }

    /// Re-fits the model from scratch over the corpus.
    ///
    /// Returns false (state unchanged) below [`MIN_TRAINING_EXAMPLES`].
    /// Above [`HOLDOUT_THRESHOLD`] the deployed model is fitted on a
    /// deterministic 80% partition only; mean squared error and R² on the
    /// held-out 20% are logged for observability and never returned.
    pub fn retrain(&mut self, corpus: &LearningCorpus) -> bool {
        if corpus.len() < MIN_TRAINING_EXAMPLES {
            debug!(
                examples = corpus.len(),
                floor = MIN_TRAINING_EXAMPLES,
                "not enough examples to retrain"
            );
            return false;
        }

        let x: Vec<FeatureVector> = corpus.examples().map(|example| example.features).collect();
        let y: Vec<f32> = corpus
            .examples()
            .map(|example| example.observed_score)
            .collect();

        if corpus.len() > HOLDOUT_THRESHOLD {
            let (training, held_out) = holdout_split(x.len(), HOLDOUT_RATIO, SPLIT_SEED);
            let train_x: Vec<FeatureVector> = training.iter().map(|&row| x[row]).collect();
            let train_y: Vec<f32> = training.iter().map(|&row| y[row]).collect();
            self.model.fit(&train_x, &train_y);

            let actual: Vec<f32> = held_out.iter().map(|&row| y[row]).collect();
            let predicted: Vec<f32> = held_out
                .iter()
                .map(|&row| self.model.predict(&x[row]))
                .collect();
            let mse = warlord_stats::regression::mean_squared_error(&actual, &predicted)
                .unwrap_or(f32::NAN);
            let r2 = warlord_stats::regression::r2_score(&actual, &predicted).unwrap_or(f32::NAN);
            info!(
                examples = corpus.len(),
                held_out = held_out.len(),
                mse,
                r2,
                "retrained with holdout evaluation"
            );
        } else {
            self.model.fit(&x, &y);
            info!(examples = corpus.len(), "retrained on full corpus");
        }

        self.trained = true;
        true
    }

    /// Estimates the power score for a record.
    ///
    /// The feature vector is always extracted first, so malformed records
    /// fail identically on both paths. Untrained estimators delegate to the
    /// baseline formula over the raw record; trained ones run the model,
    /// clamp at 0, and truncate. Never returns a negative value.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedRecordError`] if extraction rejects the record.
    pub fn predict(&self, record: &CharacterRecord) -> Result<i64, MalformedRecordError> {
        let features = self.extractor.extract(record)?;
        if !self.trained {
            return baseline::baseline_power(record);
        }
        let raw = self.model.predict(&features);
        #[expect(clippy::cast_possible_truncation)]
        let power = raw.max(0.0) as i64;
        Ok(power)
    }

    /// Feature-importance report: empty while untrained, otherwise one entry
    /// per feature id, positionally aligned with the model's importance
    /// vector.
    #[must_use]
    pub fn importances(&self) -> BTreeMap<String, f32> {
        if !self.trained {
            return BTreeMap::new();
        }
        self.extractor
            .feature_ids()
            .map(ToOwned::to_owned)
            .zip(self.model.feature_importances())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use warlord_evaluator::FEATURE_COUNT;

    use super::*;
    use crate::{
        corpus::LearningExample,
        forest::{ForestConfig, RegressionForest},
    };

    fn record(level: u32, force: i64) -> CharacterRecord {
        serde_json::from_str(&format!(
            r#"{{
                "level": {level},
                "generalGrade": 2,
                "baseStats": {{
                    "command": 10, "force": {force}, "intelligence": 10,
                    "politics": 10, "charm": 10
                }},
                "skills": {{"slot1": "Charge"}},
                "equipment": {{"weapon": {{"grade": 3}}}}
            }}"#
        ))
        .unwrap()
    }

    fn corpus_of(count: usize) -> LearningCorpus {
        let extractor = FeatureExtractor::new();
        let mut corpus = LearningCorpus::new();
        for index in 0..count {
            #[expect(clippy::cast_precision_loss)]
            let score = 100.0 + index as f32;
            let source = record(u32::try_from(index).unwrap() + 1, 10);
            corpus.append(LearningExample {
                features: extractor.extract(&source).unwrap(),
                observed_score: score,
                source_record: source,
            });
        }
        corpus
    }

    /// Test double that records what reached `fit`.
    #[derive(Debug, Default)]
    struct RecordingModel {
        fitted_rows: Vec<FeatureVector>,
    }

    impl PowerModel for RecordingModel {
        fn fit(&mut self, x: &[FeatureVector], _y: &[f32]) {
            self.fitted_rows = x.to_vec();
        }

        fn predict(&self, _features: &FeatureVector) -> f32 {
            0.0
        }

        fn feature_importances(&self) -> Vec<f32> {
            vec![0.0; FEATURE_COUNT]
        }
    }

    #[test]
    fn retrain_below_floor_is_refused() {
        let mut estimator = PowerEstimator::untrained(RegressionForest::default());
        assert!(!estimator.retrain(&corpus_of(4)));
        assert!(!estimator.is_trained());
    }

    #[test]
    fn refused_retrain_leaves_a_trained_flag_alone() {
        let mut estimator = PowerEstimator::untrained(RegressionForest::default());
        assert!(estimator.retrain(&corpus_of(8)));
        assert!(estimator.is_trained());

        assert!(!estimator.retrain(&corpus_of(4)));
        assert!(estimator.is_trained());
    }

    #[test]
    fn small_corpus_fits_every_row() {
        let mut estimator = PowerEstimator::untrained(RecordingModel::default());
        assert!(estimator.retrain(&corpus_of(8)));
        assert_eq!(estimator.model().fitted_rows.len(), 8);
    }

    #[test]
    fn holdout_rows_never_reach_the_deployed_fit() {
        let corpus = corpus_of(15);
        let all: Vec<FeatureVector> = corpus.examples().map(|e| e.features).collect();
        let (training, held_out) = holdout_split(15, 0.2, SPLIT_SEED);

        let mut estimator = PowerEstimator::untrained(RecordingModel::default());
        assert!(estimator.retrain(&corpus));

        let fitted = &estimator.model().fitted_rows;
        assert_eq!(fitted.len(), training.len());
        for &row in &held_out {
            assert!(!fitted.contains(&all[row]));
        }
    }

    #[test]
    fn untrained_prediction_equals_the_baseline() {
        let estimator = PowerEstimator::untrained(RegressionForest::default());
        let sample = record(10, 40);
        assert_eq!(
            estimator.predict(&sample).unwrap(),
            baseline::baseline_power(&sample).unwrap()
        );
    }

    #[test]
    fn trained_prediction_is_never_negative() {
        let extractor = FeatureExtractor::new();
        let mut corpus = LearningCorpus::new();
        for index in 0..8 {
            let source = record(index + 1, 10);
            corpus.append(LearningExample {
                features: extractor.extract(&source).unwrap(),
                observed_score: -500.0,
                source_record: source,
            });
        }

        let mut estimator = PowerEstimator::untrained(RegressionForest::new(ForestConfig::default()));
        assert!(estimator.retrain(&corpus));
        assert_eq!(estimator.predict(&record(4, 10)).unwrap(), 0);
    }

    #[test]
    fn importances_are_empty_until_trained() {
        let mut estimator = PowerEstimator::untrained(RegressionForest::default());
        assert!(estimator.importances().is_empty());

        assert!(estimator.retrain(&corpus_of(12)));
        let importances = estimator.importances();
        assert_eq!(importances.len(), FEATURE_COUNT);
        assert!(importances.contains_key("level"));
        assert!(importances.contains_key("skill_level"));
    }

    #[test]
    fn marking_stale_clears_the_flag() {
        let mut estimator = PowerEstimator::untrained(RegressionForest::default());
        assert!(estimator.retrain(&corpus_of(6)));
        estimator.mark_stale();
        assert!(!estimator.is_trained());
    }
}
