use crate::model::fiterror::FitResult;
use crate::model::linear::LinearModel;
use crate::model::model::RegressionModel;
use crate::model::polynomial::PolynomialModel;
use crate::model::robust::RobustModel;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regression strategy picked before training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegressionKind {
    #[default]
    Linear,
    Polynomial,
    Robust,
}

impl fmt::Display for RegressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionKind::Linear => write!(f, "Linear Regression"),
            RegressionKind::Polynomial => write!(f, "Polynomial Regression"),
            RegressionKind::Robust => write!(f, "Robust Linear Regression"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid regression kind: {0}")]
pub struct ParseKindError(String);

impl FromStr for RegressionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" | "ols" => Ok(RegressionKind::Linear),
            "polynomial" | "poly" => Ok(RegressionKind::Polynomial),
            "robust" | "roblin" => Ok(RegressionKind::Robust),
            other => Err(ParseKindError(other.to_owned())),
        }
    }
}

impl RegressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegressionKind::Linear => "linear",
            RegressionKind::Polynomial => "polynomial",
            RegressionKind::Robust => "robust",
        }
    }

    pub fn all() -> &'static [RegressionKind] {
        use RegressionKind::*;
        &[Linear, Polynomial, Robust]
    }

    /// Smallest training partition the strategy can be fitted on.
    pub fn min_points(&self) -> usize {
        match self {
            RegressionKind::Linear => 2,
            RegressionKind::Polynomial | RegressionKind::Robust => 3,
        }
    }

    pub fn fit(&self, x: &[f64], y: &[f64]) -> FitResult<Box<dyn RegressionModel>> {
        Ok(match self {
            RegressionKind::Linear => Box::new(LinearModel::from_data(x, y)?),
            RegressionKind::Polynomial => Box::new(PolynomialModel::from_data(x, y)?),
            RegressionKind::Robust => Box::new(RobustModel::from_data(x, y)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RegressionKind;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("OLS".parse::<RegressionKind>(), Ok(RegressionKind::Linear));
        assert_eq!("poly".parse::<RegressionKind>(), Ok(RegressionKind::Polynomial));
        assert_eq!("robust".parse::<RegressionKind>(), Ok(RegressionKind::Robust));
        assert!("neural".parse::<RegressionKind>().is_err());
    }

    #[test]
    fn test_fit_dispatches_on_kind() {
        let x: Vec<f64> = (0..10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 4.0 * v - 1.0).collect();
        for kind in RegressionKind::all() {
            let model = kind.fit(&x, &y).unwrap();
            assert_eq!(model.kind(), *kind);
            assert!((model.predict(20.0) - 79.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fit_small_unit_feature() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 1e-10).collect();
        let y: Vec<f64> = (0..20).map(|i| 3.0 * i as f64 + 1.0).collect();

        for kind in RegressionKind::all() {
            let model = kind.fit(&x, &y).unwrap();
            assert!((model.predict(25e-10) - 76.0).abs() < 1e-3, "{kind}: {}", model.equation());
        }
        let line = RegressionKind::Linear.fit(&x, &y).unwrap();
        assert!((line.slope() / 3e10 - 1.0).abs() < 1e-9);
    }
}
