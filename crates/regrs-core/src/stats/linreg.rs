use crate::stats::stats::is_constant;

use std::fmt;

/// Ordinary least squares line `y = intercept + slope * x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinReg {
    pub intercept: f64,
    pub slope: f64,
}

impl fmt::Display for LinReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "y = {} + {} * x", self.intercept, self.slope)
    }
}

impl LinReg {
    pub fn calculate(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Fits the line through the centered sums of squares.
    ///
    /// Returns `None` when the inputs differ in length, hold fewer than two
    /// points, or `x` has no variance.
    pub fn train(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        let n = x.len() as f64;

        let avg_x = x.iter().sum::<f64>() / n;
        let avg_y = y.iter().sum::<f64>() / n;

        let (ss_xx, ss_xy) = x.iter().zip(y).fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - avg_x;
            (sxx + dx * dx, sxy + dx * (yi - avg_y))
        });

        if is_constant(x) || !ss_xx.is_finite() || ss_xx <= 0.0 {
            return None;
        }

        let slope = ss_xy / ss_xx;
        let intercept = avg_y - slope * avg_x;

        Some(Self { intercept, slope })
    }
}

#[cfg(test)]
mod tests {
    use super::LinReg;

    #[test]
    fn test_exact_line() {
        let x = [1., 2., 3., 4., 5.];
        let y: Vec<f64> = x.iter().map(|v| 3.0 + 2.0 * v).collect();

        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope - 2.0).abs() < 1e-12);
        assert!((model.intercept - 3.0).abs() < 1e-12);
        assert!((model.calculate(10.0) - 23.0).abs() < 1e-12);
    }

    #[test]
    fn test_no_x_variance() {
        let x = [2., 2., 2.];
        let y = [1., 2., 3.];
        assert_eq!(LinReg::train(&x, &y), None);
    }

    #[test]
    fn test_tiny_spread_is_not_degenerate() {
        let x = [1e-9, 2e-9, 3e-9, 4e-9];
        let y = [2., 4., 6., 8.];
        let model = LinReg::train(&x, &y).unwrap();
        assert!((model.slope / 2e9 - 1.0).abs() < 1e-9);

        let x = [0.1, 0.1, 0.1];
        assert_eq!(LinReg::train(&x, &y[..3]), None);
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(LinReg::train(&[1., 2., 3.], &[1., 2.]), None);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(LinReg::train(&[1.], &[1.]), None);
    }
}
