use crate::stats::stats::{is_constant, mad, weight_huber};
use std::fmt;

/// Huber loss tuning constant, in units of the MAD scale.
pub const HUBER_K: f64 = 1.345;
pub const MAX_ITER: usize = 20;

/// Robust straight line fitted by iteratively reweighted least squares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for RobReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {} + {} * x (huber)", self.intercept, self.slope)
    }
}

impl RobReg {
    pub fn calculate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Train using Huber weights, starting from a trimmed OLS estimate.
    ///
    /// Coefficients are returned in the units of the input `x`.
    pub fn train(x: &[f64], y: &[f64], k: f64, max_iter: usize) -> Option<Self> {
        if x.len() != y.len() || x.len() < 3 {
            return None;
        }
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return None;
        }

        // work on centered x, shift the intercept back at the end
        let x0 = x.iter().sum::<f64>() / x.len() as f64;
        let x_c: Vec<f64> = x.iter().map(|xi| xi - x0).collect();

        let (mut slope, mut intercept) = trimmed_ols(&x_c, y, 0.1)?;

        for _ in 0..max_iter {
            let residuals: Vec<f64> =
                x_c.iter().zip(y).map(|(&xi, &yi)| yi - (intercept + slope * xi)).collect();
            let scale = mad(&residuals);
            let weights: Vec<f64> = residuals.iter().map(|&r| weight_huber(r / scale, k)).collect();

            let (next_slope, next_intercept) = weighted_ols(&x_c, y, &weights)?;
            let converged = (next_slope - slope).abs() < 1e-10 * (1.0 + slope.abs())
                && (next_intercept - intercept).abs() < 1e-10 * (1.0 + intercept.abs());
            slope = next_slope;
            intercept = next_intercept;
            if converged {
                break;
            }
        }

        Some(Self { intercept: intercept - slope * x0, slope })
    }
}

fn weighted_ols(x: &[f64], y: &[f64], w: &[f64]) -> Option<(f64, f64)> {
    let w_sum: f64 = w.iter().sum();
    if w_sum <= 0.0 {
        return None;
    }
    let xw_mean = x.iter().zip(w).map(|(&xi, &wi)| xi * wi).sum::<f64>() / w_sum;
    let yw_mean = y.iter().zip(w).map(|(&yi, &wi)| yi * wi).sum::<f64>() / w_sum;

    let (sxx, sxy) = x.iter().zip(y).zip(w).fold((0.0, 0.0), |(sxx, sxy), ((&xi, &yi), &wi)| {
        let dx = xi - xw_mean;
        (sxx + wi * dx * dx, sxy + wi * dx * (yi - yw_mean))
    });

    if is_constant(x) || !sxx.is_finite() || sxx <= 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, yw_mean - slope * xw_mean))
}

/// OLS refit after discarding the `trim_frac` largest and smallest residuals.
fn trimmed_ols(x: &[f64], y: &[f64], trim_frac: f64) -> Option<(f64, f64)> {
    if !(0.0..0.5).contains(&trim_frac) {
        return None;
    }
    let ones = vec![1.0; x.len()];
    let (slope, intercept) = weighted_ols(x, y, &ones)?;

    let mut by_residual: Vec<(f64, f64, f64)> = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| (xi, yi, (yi - (intercept + slope * xi)).abs()))
        .collect();
    by_residual.sort_by(|a, b| a.2.total_cmp(&b.2));

    let n = by_residual.len();
    let trim_n = ((n as f64) * trim_frac).floor() as usize;
    let kept = &by_residual[trim_n..n - trim_n];
    if kept.len() < 2 {
        return None;
    }

    let xs: Vec<f64> = kept.iter().map(|t| t.0).collect();
    let ys: Vec<f64> = kept.iter().map(|t| t.1).collect();
    weighted_ols(&xs, &ys, &vec![1.0; xs.len()])
}
