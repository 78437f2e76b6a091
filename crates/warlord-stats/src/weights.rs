//! Weight vector operations.

/// Normalizes a weight vector to sum to 1.0 (L1 normalization).
///
/// After normalization each weight represents its proportional contribution,
/// which keeps reported feature importances comparable across models fitted
/// on different data. If the sum is zero or negative, weights are left
/// unchanged (to avoid division by zero).
///
/// # Examples
///
/// ```
/// use warlord_stats::weights::normalize_l1;
///
/// let mut weights = vec![1.0, 3.0];
/// normalize_l1(&mut weights);
/// assert_eq!(weights, vec![0.25, 0.75]);
/// ```
pub fn normalize_l1(weights: &mut [f32]) {
    let sum: f32 = weights.iter().copied().sum();
    if sum > 0.0 {
        for w in weights {
            *w /= sum;
        }
    }
}
