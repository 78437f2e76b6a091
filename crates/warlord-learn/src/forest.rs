//! Bagged regression forest over record feature vectors.
//!
//! This is the default [`PowerModel`]: an ensemble of depth-limited
//! regression trees, each fitted on a bootstrap resample of the training
//! matrix. Predictions average the per-tree outputs.
//!
//! # Algorithm
//!
//! Each tree is grown greedily. At every node the builder scans all 15
//! features for the split that minimizes the summed squared error of the two
//! children, using midpoints between adjacent distinct values as candidate
//! thresholds. Growth stops at the depth limit, at the minimum leaf size, or
//! when no split improves on the node's own squared error.
//!
//! # Determinism
//!
//! Bootstrap resampling is the only source of randomness and is driven by a
//! `Pcg32` seeded from [`ForestConfig::seed`], so fitting the same
//! configuration on the same matrix always produces the same forest. This
//! keeps retrains reproducible and lets persisted models be compared across
//! process restarts.
//!
//! # Feature Importances
//!
//! Split gains (squared-error reduction) are accumulated per feature across
//! all trees and L1-normalized, so importances sum to 1.0 and represent each
//! feature's proportional contribution to the fit.
//!
//! # Current Limitations
//!
//! - Splits always consider every feature; there is no per-split feature
//!   subsampling, so heavily correlated features share credit in proportion
//!   to how often the greedy scan picks each one first.
//! - Split statistics accumulate in `f64`: squared score sums over a full
//!   1000-example window exceed what an `f32` mantissa can hold exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use warlord_evaluator::{FEATURE_COUNT, FeatureVector};

use crate::model::PowerModel;

/// Forest shape and seeding parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of bagged trees.
    pub tree_count: usize,
    /// Maximum tree depth (root is depth 0).
    pub max_depth: usize,
    /// Minimum number of samples on each side of a split.
    pub min_leaf_size: usize,
    /// Seed for bootstrap resampling.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 100,
            max_depth: 8,
            min_leaf_size: 2,
            seed: 42,
        }
    }
}

/// Bagged ensemble of regression trees.
///
/// Serializable as a whole; a fitted forest is the engine's durable model
/// blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegressionForest {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    importances: Vec<f32>,
}

impl RegressionForest {
    #[must_use]
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            importances: Vec::new(),
        }
    }

    /// Whether [`fit`](PowerModel::fit) has run at least once.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

impl PowerModel for RegressionForest {
    fn fit(&mut self, x: &[FeatureVector], y: &[f32]) {
        assert_eq!(x.len(), y.len());
        assert!(!x.is_empty(), "cannot fit a forest on an empty matrix");

        let mut rng = Pcg32::seed_from_u64(self.config.seed);
        let mut gains = [0.0f64; FEATURE_COUNT];
        let sample_count = x.len();

        self.trees = (0..self.config.tree_count)
            .map(|_| {
                let sample: Vec<usize> = (0..sample_count)
                    .map(|_| rng.random_range(0..sample_count))
                    .collect();
                RegressionTree::fit(x, y, sample, &self.config, &mut gains)
            })
            .collect();

        #[expect(clippy::cast_possible_truncation)]
        let mut importances: Vec<f32> = gains.iter().map(|&gain| gain as f32).collect();
        warlord_stats::weights::normalize_l1(&mut importances);
        self.importances = importances;
    }

    /// # Panics
    ///
    /// Panics if the forest has never been fitted.
    #[expect(clippy::cast_precision_loss)]
    fn predict(&self, features: &FeatureVector) -> f32 {
        assert!(self.is_fitted(), "predict on an unfitted forest");
        let sum: f32 = self.trees.iter().map(|tree| tree.predict(features)).sum();
        sum / self.trees.len() as f32
    }

    fn feature_importances(&self) -> Vec<f32> {
        self.importances.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TreeNode {
    Leaf {
        value: f32,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

/// One depth-limited regression tree, nodes stored in a flat arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegressionTree {
    nodes: Vec<TreeNode>,
    root: usize,
}

impl RegressionTree {
    fn fit(
        x: &[FeatureVector],
        y: &[f32],
        sample: Vec<usize>,
        config: &ForestConfig,
        gains: &mut [f64; FEATURE_COUNT],
    ) -> Self {
        let mut nodes = Vec::new();
        let root = build_node(x, y, sample, 0, config, &mut nodes, gains);
        Self { nodes, root }
    }

    fn predict(&self, features: &FeatureVector) -> f32 {
        let mut index = self.root;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f32,
    /// Position in the feature-sorted row order where the right child starts.
    boundary: usize,
    gain: f64,
    children_sse: f64,
}

/// Recursively grows one subtree, returning its arena index.
fn build_node(
    x: &[FeatureVector],
    y: &[f32],
    indices: Vec<usize>,
    depth: usize,
    config: &ForestConfig,
    nodes: &mut Vec<TreeNode>,
    gains: &mut [f64; FEATURE_COUNT],
) -> usize {
    let value = target_mean(y, &indices);
    let splittable = depth < config.max_depth && indices.len() >= 2 * config.min_leaf_size;
    let candidate = if splittable {
        best_split(x, y, &indices, config.min_leaf_size)
    } else {
        None
    };

    let Some(split) = candidate else {
        nodes.push(TreeNode::Leaf { value });
        return nodes.len() - 1;
    };

    gains[split.feature] += split.gain;

    // Partition by the scored boundary, not the threshold: when two adjacent
    // feature values are so close that their midpoint rounds onto one of
    // them, a threshold comparison would disagree with the split statistics.
    let mut left_indices = indices;
    left_indices.sort_by(|&a, &b| x[a][split.feature].total_cmp(&x[b][split.feature]));
    let right_indices = left_indices.split_off(split.boundary);

    let left = build_node(x, y, left_indices, depth + 1, config, nodes, gains);
    let right = build_node(x, y, right_indices, depth + 1, config, nodes, gains);
    nodes.push(TreeNode::Split {
        feature: split.feature,
        threshold: split.threshold,
        left,
        right,
    });
    nodes.len() - 1
}

#[expect(clippy::cast_precision_loss)]
fn target_mean(y: &[f32], indices: &[usize]) -> f32 {
    let sum: f64 = indices.iter().map(|&row| f64::from(y[row])).sum();
    #[expect(clippy::cast_possible_truncation)]
    let mean = (sum / indices.len() as f64) as f32;
    mean
}

/// Summed squared error of the rows around their own mean.
#[expect(clippy::cast_precision_loss)]
fn squared_error(sum: f64, sum_sq: f64, count: usize) -> f64 {
    sum_sq - sum * sum / count as f64
}

/// Scans every feature for the split minimizing the children's summed
/// squared error. Returns `None` when no candidate separates at least
/// `min_leaf` rows per side on distinct values, or when the best candidate
/// does not reduce the error.
fn best_split(
    x: &[FeatureVector],
    y: &[f32],
    indices: &[usize],
    min_leaf: usize,
) -> Option<SplitCandidate> {
    let total: f64 = indices.iter().map(|&row| f64::from(y[row])).sum();
    let total_sq: f64 = indices
        .iter()
        .map(|&row| f64::from(y[row]) * f64::from(y[row]))
        .sum();
    let parent_sse = squared_error(total, total_sq, indices.len());

    let mut best: Option<SplitCandidate> = None;
    for feature in 0..FEATURE_COUNT {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let mut left_sum = 0.0f64;
        let mut left_sq = 0.0f64;
        for boundary in 1..order.len() {
            let row = order[boundary - 1];
            left_sum += f64::from(y[row]);
            left_sq += f64::from(y[row]) * f64::from(y[row]);

            let below = x[order[boundary - 1]][feature];
            let above = x[order[boundary]][feature];
            if below == above {
                continue;
            }
            if boundary < min_leaf || order.len() - boundary < min_leaf {
                continue;
            }

            let children_sse = squared_error(left_sum, left_sq, boundary)
                + squared_error(total - left_sum, total_sq - left_sq, order.len() - boundary);
            if best
                .as_ref()
                .is_none_or(|current| children_sse < current.children_sse)
            {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (below + above) / 2.0,
                    boundary,
                    gain: parent_sse - children_sse,
                    children_sse,
                });
            }
        }
    }

    best.filter(|candidate| candidate.gain > 1e-9)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(level: f32) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[0] = level;
        FeatureVector::new(values)
    }

    fn linear_matrix(count: usize) -> (Vec<FeatureVector>, Vec<f32>) {
        let rows: Vec<FeatureVector> = (0..count)
            .map(|index| {
                #[expect(clippy::cast_precision_loss)]
                let level = index as f32;
                vector(level)
            })
            .collect();
        let targets: Vec<f32> = rows.iter().map(|row| row[0] * 10.0).collect();
        (rows, targets)
    }

    #[test]
    fn learns_a_monotone_relationship() {
        let (x, y) = linear_matrix(40);
        let mut forest = RegressionForest::default();
        forest.fit(&x, &y);

        let low = forest.predict(&vector(2.0));
        let high = forest.predict(&vector(35.0));
        assert!(low < high);
        assert!((forest.predict(&vector(20.0)) - 200.0).abs() < 40.0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let (x, y) = linear_matrix(30);
        let mut first = RegressionForest::default();
        let mut second = RegressionForest::default();
        first.fit(&x, &y);
        second.fit(&x, &y);

        let probe = vector(17.5);
        assert_eq!(first.predict(&probe), second.predict(&probe));
        assert_eq!(first.feature_importances(), second.feature_importances());
    }

    #[test]
    fn importances_concentrate_on_the_predictive_feature() {
        let (x, y) = linear_matrix(40);
        let mut forest = RegressionForest::default();
        forest.fit(&x, &y);

        let importances = forest.feature_importances();
        assert_eq!(importances.len(), FEATURE_COUNT);
        let sum: f32 = importances.iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
        // only feature 0 carries signal
        assert!(importances[0] > 0.99);
    }

    #[test]
    fn unfitted_forest_reports_no_importances() {
        let forest = RegressionForest::default();
        assert!(!forest.is_fitted());
        assert!(forest.feature_importances().is_empty());
    }

    #[test]
    fn fitted_forest_round_trips_through_serde() {
        let (x, y) = linear_matrix(25);
        let mut forest = RegressionForest::default();
        forest.fit(&x, &y);

        let json = serde_json::to_string(&forest).unwrap();
        let restored: RegressionForest = serde_json::from_str(&json).unwrap();

        let probe = vector(11.0);
        assert_eq!(forest.predict(&probe), restored.predict(&probe));
        assert_eq!(
            forest.feature_importances(),
            restored.feature_importances()
        );
    }

    #[test]
    fn constant_targets_collapse_to_a_single_leaf() {
        let (x, _) = linear_matrix(12);
        let y = vec![7.0; 12];
        let mut forest = RegressionForest::default();
        forest.fit(&x, &y);
        assert_eq!(forest.predict(&vector(3.0)), 7.0);
    }
}
