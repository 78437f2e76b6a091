//! Goodness-of-fit metrics for regression models.

/// Computes the arithmetic mean of a dataset.
///
/// # Returns
///
/// * `Some(mean)` - if the dataset contains at least one value
/// * `None` - if the dataset is empty
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().copied().sum::<f32>() / values.len() as f32)
}

/// Computes the mean squared error between actual and predicted values.
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Returns
///
/// * `Some(mse)` - if the datasets contain at least one value
/// * `None` - if the datasets are empty
///
/// # Examples
///
/// ```
/// use warlord_stats::regression::mean_squared_error;
///
/// let mse = mean_squared_error(&[1.0, 2.0], &[1.0, 4.0]).unwrap();
/// assert_eq!(mse, 2.0);
/// ```
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn mean_squared_error(actual: &[f32], predicted: &[f32]) -> Option<f32> {
    assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() {
        return None;
    }
    let sum = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f32>();
    Some(sum / actual.len() as f32)
}

/// Computes the coefficient of determination (R²).
///
/// R² measures the fraction of variance in `actual` explained by
/// `predicted`. A perfect fit scores 1.0; a model no better than predicting
/// the mean scores 0.0; worse models score negative.
///
/// # Panics
///
/// Panics if the slices have different lengths.
///
/// # Returns
///
/// * `Some(r2)` - if the dataset is non-empty and `actual` has nonzero variance
/// * `None` - if the dataset is empty or all actual values are identical
///   (the score is undefined in that case)
///
/// # Examples
///
/// ```
/// use warlord_stats::regression::r2_score;
///
/// let r2 = r2_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(r2, 1.0);
/// ```
#[must_use]
pub fn r2_score(actual: &[f32], predicted: &[f32]) -> Option<f32> {
    assert_eq!(actual.len(), predicted.len());
    let mean = mean(actual)?;
    let total = actual.iter().map(|a| (a - mean).powi(2)).sum::<f32>();
    if total == 0.0 {
        return None;
    }
    let residual = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f32>();
    Some(1.0 - residual / total)
}
