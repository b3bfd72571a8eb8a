use crate::model::kind::RegressionKind;
use crate::stats::{adjusted_r2, aic_from_rss, r2_from_predictions, residual_sum_of_squares, rmse};

use dyn_clone::DynClone;
use std::fmt;

/// Goodness-of-fit numbers computed on the training partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitStats {
    pub n: usize,
    pub r2: f64,
    pub adjusted_r2: f64,
    pub rmse: f64,
    pub sigma: f64,
    pub aic: f64,
    /// Two-sided p-value of the slope; only the OLS line provides one.
    pub p_value: Option<f64>,
}

impl FitStats {
    /// `predictors` excludes the intercept.
    pub(crate) fn from_predictions(y: &[f64], y_hat: &[f64], predictors: usize) -> Self {
        let n = y.len();
        let rss = residual_sum_of_squares(y, y_hat);
        let r2 = r2_from_predictions(y, y_hat).unwrap_or(0.0);
        let dof = n as f64 - predictors as f64 - 1.0;
        let sigma = if dof > 0.0 { (rss / dof).sqrt() } else { f64::NAN };

        Self {
            n,
            r2,
            adjusted_r2: adjusted_r2(r2, n, predictors),
            rmse: rmse(y, y_hat).unwrap_or(0.0),
            sigma,
            aic: aic_from_rss(rss, n, predictors + 1),
            p_value: None,
        }
    }
}

/// Contract shared by every regression strategy: one input column in,
/// one predicted value out.
pub trait RegressionModel: Sync + Send + DynClone + fmt::Debug {
    fn kind(&self) -> RegressionKind;
    fn predict(&self, x: f64) -> f64;
    fn intercept(&self) -> f64;
    /// Slope for the straight-line strategies, derivative at the mean of x
    /// for the polynomial.
    fn slope(&self) -> f64;
    fn coefficients(&self) -> Vec<f64>;
    fn fit_stats(&self) -> &FitStats;
    fn equation(&self) -> String;

    fn predict_all(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.predict(xi)).collect()
    }
}
dyn_clone::clone_trait_object!(RegressionModel);

impl fmt::Display for dyn RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = self.fit_stats();
        write!(f, "{}, {}, r2: {:.4}, n: {}", self.kind(), self.equation(), stats.r2, stats.n)
    }
}
