/// All values equal. Checked exactly so the answer does not depend on the
/// units of the data.
pub fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

pub fn weight_huber(r: f64, k: f64) -> f64 {
    let abs_r = r.abs();
    if abs_r <= k {
        1.0
    } else {
        k / abs_r
    }
}

// Median Absolute Deviation, scaled to sigma for normal residuals
pub fn mad(residuals: &[f64]) -> f64 {
    let med = median(residuals);
    let deviations: Vec<f64> = residuals.iter().map(|r| (r - med).abs()).collect();
    let mad = median(&deviations) / 0.6745;
    if mad < 1e-12 {
        1e-12
    } else {
        mad
    }
}

pub fn median(data: &[f64]) -> f64 {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();

    let len = sorted.len();
    if len == 0 {
        return f64::NAN;
    }

    sorted.sort_by(f64::total_cmp);

    let mid = len / 2;
    if len % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn residual_sum_of_squares(y: &[f64], y_hat: &[f64]) -> f64 {
    y.iter().zip(y_hat).map(|(&yi, &yhi)| (yi - yhi).powi(2)).sum()
}

pub fn mse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }
    Some(residual_sum_of_squares(y, y_hat) / y.len() as f64)
}

pub fn rmse(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    mse(y, y_hat).map(f64::sqrt)
}

/// Coefficient of determination around the mean of `y`.
///
/// A constant `y` has no variance to explain: the score is 1.0 when the
/// predictions match exactly and 0.0 otherwise.
pub fn r2_from_predictions(y: &[f64], y_hat: &[f64]) -> Option<f64> {
    if y.len() != y_hat.len() || y.is_empty() {
        return None;
    }

    let y_mean = mean(y)?;

    let ss_res = residual_sum_of_squares(y, y_hat);
    let ss_tot: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Some(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Some(1.0 - ss_res / ss_tot)
}

pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    if n <= k + 1 {
        return r2; // Not enough data to adjust
    }
    1.0 - (1.0 - r2) * (n as f64 - 1.0) / (n as f64 - k as f64 - 1.0)
}

pub fn aic_from_rss(rss: f64, n: usize, k: usize) -> f64 {
    if rss <= 0.0 || n == 0 {
        return f64::NEG_INFINITY; // perfect fit
    }
    n as f64 * (rss / n as f64).ln() + 2.0 * k as f64
}
