use crate::model::fiterror::{check_inputs, FitError, FitResult};
use crate::model::kind::RegressionKind;
use crate::model::model::{FitStats, RegressionModel};
use crate::stats::PolyReg;

#[derive(Debug, Clone)]
pub struct PolynomialModel {
    pub model: PolyReg,
    pub stats: FitStats,
}

impl RegressionModel for PolynomialModel {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Polynomial
    }
    fn predict(&self, x: f64) -> f64 {
        self.model.calculate(x)
    }
    fn intercept(&self) -> f64 {
        self.model.calculate(0.0)
    }
    fn slope(&self) -> f64 {
        self.model.slope_at(self.model.x_offset)
    }
    fn coefficients(&self) -> Vec<f64> {
        vec![self.model.a0, self.model.a1, self.model.a2]
    }
    fn fit_stats(&self) -> &FitStats {
        &self.stats
    }
    fn equation(&self) -> String {
        self.model.to_string()
    }
}

impl PolynomialModel {
    pub fn from_data(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_inputs(x, y, RegressionKind::Polynomial.min_points())?;

        let model = PolyReg::train(x, y).ok_or(FitError::Singular)?;
        let y_hat: Vec<f64> = x.iter().map(|&xi| model.calculate(xi)).collect();

        // predictors: x and x²
        let stats = FitStats::from_predictions(y, &y_hat, 2);
        Ok(Self { model, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_fit_beats_curvature() {
        let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|v| 5.0 + 0.1 * v * v).collect();

        let fit = PolynomialModel::from_data(&x, &y).unwrap();
        assert!(fit.stats.r2 > 0.999999);
        assert!((fit.intercept() - 5.0).abs() < 1e-6);
        assert!((fit.predict(40.0) - 165.0).abs() < 1e-6);
        assert_eq!(fit.coefficients().len(), 3);
    }

    #[test]
    fn test_poly_needs_three_points() {
        let err = PolynomialModel::from_data(&[1.0, 2.0], &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, FitError::NotEnoughPoints { len: 2, needed: 3 });
    }
}
