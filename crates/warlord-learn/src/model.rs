//! The opaque regression capability the estimator is built over.

use warlord_evaluator::FeatureVector;

/// A trainable regression model over record feature vectors.
///
/// The rest of the system sees nothing of a model beyond this capability set,
/// so any regressor (ensemble tree, linear, gradient-boosted) is
/// substitutable without touching the estimator. Tests substitute recording
/// doubles through the same seam.
pub trait PowerModel {
    /// Fits the model from scratch on the given matrix. Rows of `x` pair
    /// positionally with `y`.
    ///
    /// # Panics
    ///
    /// Implementations may panic on an empty matrix or mismatched lengths;
    /// the estimator never passes either.
    fn fit(&mut self, x: &[FeatureVector], y: &[f32]);

    /// Predicts a score for one feature vector. Only meaningful after a
    /// successful [`fit`](Self::fit).
    #[must_use]
    fn predict(&self, features: &FeatureVector) -> f32;

    /// Per-feature importance weights, positionally aligned with the feature
    /// vector. Empty before the first fit. No particular scale is promised
    /// beyond what the model naturally produces.
    #[must_use]
    fn feature_importances(&self) -> Vec<f32>;
}
