use statrs::statistics::Statistics;

/// Coefficient of determination, `NaN` for an empty sample.
///
/// A constant target scores `1.0` on a perfect fit and `0.0` otherwise.
#[must_use]
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    debug_assert_eq!(y_true.len(), y_pred.len());
    if y_true.is_empty() {
        return f64::NAN;
    }

    let mean = y_true.mean();
    let residual_sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(y_true, y_pred)| (y_true - y_pred).powi(2))
        .sum();
    let total_sum: f64 = y_true.iter().map(|y| (y - mean).powi(2)).sum();

    if total_sum == 0.0 {
        return if residual_sum == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - residual_sum / total_sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_ok() {
        assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]), 1.0);
    }

    #[test]
    fn mean_prediction_ok() {
        assert_eq!(r2_score(&[1.0, 2.0, 3.0], &[2.0, 2.0, 2.0]), 0.0);
    }

    #[test]
    fn partial_fit_ok() {
        let score = r2_score(&[3.0, -0.5, 2.0, 7.0], &[2.5, 0.0, 2.0, 8.0]);
        assert!((score - 0.9486081370449679).abs() < 1e-12, "{}", score);
    }

    #[test]
    fn constant_target_ok() {
        assert_eq!(r2_score(&[2.0, 2.0], &[2.0, 2.0]), 1.0);
        assert_eq!(r2_score(&[2.0, 2.0], &[2.0, 3.0]), 0.0);
    }

    #[test]
    fn empty_is_nan() {
        assert!(r2_score(&[], &[]).is_nan());
    }
}
