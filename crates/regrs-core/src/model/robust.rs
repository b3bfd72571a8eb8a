use crate::model::fiterror::{check_inputs, FitError, FitResult};
use crate::model::kind::RegressionKind;
use crate::model::model::{FitStats, RegressionModel};
use crate::stats::robreg::{HUBER_K, MAX_ITER};
use crate::stats::RobReg;

#[derive(Debug, Clone)]
pub struct RobustModel {
    pub model: RobReg,
    pub stats: FitStats,
}

impl RegressionModel for RobustModel {
    fn kind(&self) -> RegressionKind {
        RegressionKind::Robust
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

impl RobustModel {
    pub fn from_data(x: &[f64], y: &[f64]) -> FitResult<Self> {
        check_inputs(x, y, RegressionKind::Robust.min_points())?;

        let model = RobReg::train(x, y, HUBER_K, MAX_ITER).ok_or(FitError::DegenerateX)?;
        let y_hat: Vec<f64> = x.iter().map(|&xi| model.calculate(xi)).collect();

        let stats = FitStats::from_predictions(y, &y_hat, 1);
        Ok(Self { model, stats })
    }
}
