use crate::model::fiterror::{check_inputs, FitError, FitResult};
use crate::model::kind::RegressionKind;
use crate::model::model::{FitStats, RegressionModel};
use crate::stats::LinReg;

use statrs::distribution::{ContinuousCDF, StudentsT};

#[derive(Debug, Clone)]
pub struct LinearModel {
    pub model: LinReg,
    pub stats: FitStats,
}

impl RegressionModel for LinearModel {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Linear
    }
    fn predict(&self, x: f64) -> f64 {
        self.model.calculate(x)
    }
    fn intercept(&self) -> f64 {
        self.model.intercept
    }
    fn slope(&self) -> f64 {
        self.model.slope
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.model.intercept, self.model.slope]
    }
    fn fit_stats(&self) -> &FitStats {
        &self.stats
    }
    fn equation(&self) -> String {
        self.model.to_string()
    }
}

impl LinearModel {
    pub fn from_data(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_inputs(x, y, RegressionKind::Linear.min_points())?;

        let model = LinReg::train(x, y).ok_or(FitError::DegenerateX)?;
        if !model.slope.is_finite() || !model.intercept.is_finite() {
            return Err(FitError::NonFinite("coefficients"));
        }

        let y_hat: Vec<f64> = x.iter().map(|&xi| model.calculate(xi)).collect();
        let mut stats = FitStats::from_predictions(y, &y_hat, 1);
        stats.p_value = slope_p_value(x, model.slope, stats.sigma);

        Ok(Self { model, stats })
    }
}

/// t-test of the slope against zero with n - 2 degrees of freedom.
///
/// `None` for a perfect fit (zero standard error) or fewer than three points.
fn slope_p_value(x: &[f64], slope: f64, sigma: f64) -> Option<f64> {
    let n = x.len() as f64;
    if n < 3.0 || !sigma.is_finite() {
        return None;
    }
    let x_mean = x.iter().sum::<f64>() / n;
    let ss_xx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();

    let se_slope = sigma / ss_xx.sqrt();
    if !se_slope.is_finite() || se_slope <= 0.0 {
        return None;
    }
    let t_stat = slope / se_slope;
    if !t_stat.is_finite() {
        return None;
    }
    let dist = StudentsT::new(0.0, 1.0, n - 2.0).ok()?;
    Some(2.0 * (1.0 - dist.cdf(t_stat.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_fit_stats() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y = [2.1, 3.9, 6.2, 7.8, 10.1, 12.0];

        let fit = LinearModel::from_data(&x, &y).unwrap();
        assert!((fit.slope() - 1.98).abs() < 0.05);
        assert!(fit.stats.r2 > 0.99 && fit.stats.r2 <= 1.0);
        assert!(fit.stats.adjusted_r2 <= fit.stats.r2);
        assert!(fit.stats.sigma > 0.0);
        let p = fit.stats.p_value.unwrap();
        assert!(p < 1e-4, "p {p}");
    }

    #[test]
    fn test_perfect_fit_has_no_p_value() {
        let x = [1.0, 2.0, 3.0];
        let y = [2.0, 4.0, 6.0];
        let fit = LinearModel::from_data(&x, &y).unwrap();
        assert_eq!(fit.stats.p_value, None);
        assert_eq!(fit.stats.r2, 1.0);
    }

    #[test]
    fn test_constant_x_is_degenerate() {
        let err = LinearModel::from_data(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, FitError::DegenerateX);
    }

    #[test]
    fn test_non_finite_input() {
        let err = LinearModel::from_data(&[1.0, f64::INFINITY], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::NonFinite("input"));
    }
}
