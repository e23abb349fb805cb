//! Ordinary least squares linear regression.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::features::{FeatureVector, FEATURE_NAMES, N_FEATURES, REFERENCE_YEAR};
use crate::math::statistics::r2_score;
use crate::math::vector::dot;
use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegression {
    pub intercept: f64,
    pub coefficients: FeatureVector,

    /// Car ages the model was fitted on are relative to this year.
    pub reference_year: i32,

    pub feature_names: Vec<String>,
}

impl LinearRegression {
    /// Fits on centered data, the intercept is recovered from the means.
    /// Rank-deficient samples get the minimum-norm solution.
    #[instrument(skip_all, fields(n_samples = x.len()))]
    pub fn fit(x: &[FeatureVector], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            bail!("{} feature rows vs. {} targets", x.len(), y.len());
        }
        if x.is_empty() {
            bail!("cannot fit a regression on an empty sample");
        }

        let n_samples = x.len();
        let x = DMatrix::from_fn(n_samples, N_FEATURES, |i, j| x[i][j]);
        let y = DVector::from_column_slice(y);

        let x_mean: Vec<f64> = x.column_iter().map(|column| column.mean()).collect();
        let y_mean = y.mean();
        let x_centered = DMatrix::from_fn(n_samples, N_FEATURES, |i, j| x[(i, j)] - x_mean[j]);
        let y_centered = y.add_scalar(-y_mean);

        let svd = x_centered.svd(true, true);
        let max_singular_value = svd.singular_values.max();
        let eps = f64::EPSILON * n_samples.max(N_FEATURES) as f64 * max_singular_value;
        let solution = svd.solve(&y_centered, eps).map_err(|error| anyhow!(error))?;

        let mut coefficients = [0.0; N_FEATURES];
        for (coefficient, value) in coefficients.iter_mut().zip(solution.iter()) {
            *coefficient = *value;
        }
        let intercept = y_mean - dot(&coefficients, &x_mean);
        debug!(intercept, ?coefficients, "fitted");

        Ok(Self {
            intercept,
            coefficients,
            reference_year: REFERENCE_YEAR,
            feature_names: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
        })
    }

    #[must_use]
    pub fn predict(&self, x: &FeatureVector) -> f64 {
        self.intercept + dot(&self.coefficients, x)
    }

    /// Coefficient of determination of the predictions on the sample.
    #[must_use]
    pub fn score(&self, x: &[FeatureVector], y: &[f64]) -> f64 {
        let predictions: Vec<f64> = x.iter().map(|x| self.predict(x)).collect();
        r2_score(y, &predictions)
    }

    /// Checks that the model was fitted on the feature layout this build produces.
    pub fn ensure_compatible(&self) -> Result {
        if self.reference_year != REFERENCE_YEAR {
            bail!(
                "the model was fitted with reference year {}, but car age is computed against {}",
                self.reference_year,
                REFERENCE_YEAR,
            );
        }
        if self.feature_names.iter().ne(FEATURE_NAMES.iter()) {
            bail!(
                "the model was fitted on features {:?}, expected {:?}",
                self.feature_names,
                FEATURE_NAMES,
            );
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            bail!("the model has non-finite parameters");
        }
        Ok(())
    }
}
