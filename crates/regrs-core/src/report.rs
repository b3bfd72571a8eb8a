use crate::model::RegressionKind;
use crate::stats::{mse, r2_from_predictions};

use serde::Serialize;
use std::fmt;

/// Test-partition accuracy of a trained model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub kind: RegressionKind,
    pub n_test: usize,
    pub mse: f64,
    pub rmse: f64,
    pub r2: f64,
}

impl AccuracyReport {
    pub fn from_predictions(kind: RegressionKind, y: &[f64], y_hat: &[f64]) -> Option<Self> {
        let mse = mse(y, y_hat)?;
        let r2 = r2_from_predictions(y, y_hat)?;
        Some(Self { kind, n_test: y.len(), mse, rmse: mse.sqrt(), r2 })
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: R2_Score: {}, RMSE: {}, MSE: {}", self.kind, self.r2, self.rmse, self.mse)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub target: String,
    pub input: f64,
    pub value: f64,
}

impl Prediction {
    pub fn label(&self) -> String {
        format!("Predicted {} is {}", self.target, self.value)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let report =
            AccuracyReport::from_predictions(RegressionKind::Linear, &[1., 2., 3.], &[1., 2., 4.])
                .unwrap();
        assert_eq!(report.n_test, 3);
        assert!((report.mse - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.rmse, report.mse.sqrt());
        assert!((report.r2 - 0.5).abs() < 1e-12);
        assert!(report.to_string().starts_with("Linear Regression: R2_Score: 0.5"));
    }

    #[test]
    fn test_prediction_label() {
        let p = Prediction { target: "Profit".to_owned(), input: 10.0, value: 42.5 };
        assert_eq!(p.label(), "Predicted Profit is 42.5");
    }
}
