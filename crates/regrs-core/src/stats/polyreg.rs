use std::fmt;

/// Quadratic least squares fit `y = a0 + a1 * u + a2 * u²` with `u = x - x_offset`.
///
/// `x` is centered on its mean before solving so that large feature values
/// (money, timestamps) do not blow up the fourth-power sums.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyReg {
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
    pub x_offset: f64,
}

impl fmt::Display for PolyReg {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "y = {} + {} * (x - {}) + {} * (x - {})^2",
            self.a0, self.a1, self.x_offset, self.a2, self.x_offset
        )
    }
}

impl PolyReg {
    pub fn calculate(&self, x: f64) -> f64 {
        let u = x - self.x_offset;
        self.a0 + self.a1 * u + self.a2 * u * u
    }

    /// First derivative at `x`.
    pub fn slope_at(&self, x: f64) -> f64 {
        self.a1 + 2.0 * self.a2 * (x - self.x_offset)
    }

    pub fn train(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 3 {
            return None;
        }

        let n = x.len() as f64;
        let x_offset = x.iter().sum::<f64>() / n;

        let (mut sum_u, mut sum_u2, mut sum_u3, mut sum_u4) = (0.0, 0.0, 0.0, 0.0);
        let (mut sum_y, mut sum_uy, mut sum_u2y) = (0.0, 0.0, 0.0);

        for (&xi, &yi) in x.iter().zip(y) {
            let u = xi - x_offset;
            let u2 = u * u;

            sum_u += u;
            sum_u2 += u2;
            sum_u3 += u2 * u;
            sum_u4 += u2 * u2;

            sum_y += yi;
            sum_uy += u * yi;
            sum_u2y += u2 * yi;
        }

        let a = nalgebra::Matrix3::new(
            n, sum_u, sum_u2, //
            sum_u, sum_u2, sum_u3, //
            sum_u2, sum_u3, sum_u4,
        );
        let b = nalgebra::Vector3::new(sum_y, sum_uy, sum_u2y);

        let coeffs = a.lu().solve(&b)?;
        if coeffs.iter().any(|c| !c.is_finite()) {
            return None;
        }

        Some(Self { a0: coeffs[0], a1: coeffs[1], a2: coeffs[2], x_offset })
    }
}

#[cfg(test)]
mod tests {
    use super::PolyReg;

    #[test]
    fn test_recovers_parabola() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|v| 1.0 - 2.0 * v + 0.5 * v * v).collect();

        let model = PolyReg::train(&x, &y).unwrap();
        for &xi in &[0.0, 3.3, 12.0] {
            let expected = 1.0 - 2.0 * xi + 0.5 * xi * xi;
            assert!((model.calculate(xi) - expected).abs() < 1e-8);
        }
        assert!((model.slope_at(2.0) - 0.0).abs() < 1e-8);
    }

    #[test]
    fn test_too_few_points() {
        assert!(PolyReg::train(&[1., 2.], &[1., 2.]).is_none());
    }

    #[test]
    fn test_singular_system() {
        // two distinct x values cannot pin down a parabola
        let x = [1., 1., 2., 2.];
        let y = [1., 1., 2., 2.];
        assert!(PolyReg::train(&x, &y).is_none());
    }
}
