//! Actual-versus-predicted comparison of a trained model on its test rows.

use crate::error::{RegressionError, Result};
use crate::model::RegressionModel;
use crate::split::SplitPartition;

use itertools::Itertools;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

pub const PLOT_WIDTH: u32 = 800;
pub const PLOT_HEIGHT: u32 = 600;

const PREDICTED_COLOR: RGBColor = RGBColor(255, 165, 0);
const LOW_COLOR: (f64, f64, f64) = (198.0, 219.0, 239.0);
const HIGH_COLOR: (f64, f64, f64) = (8.0, 48.0, 107.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// Caption, axis descriptions and legend. Needs a system font.
    pub draw_labels: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self { width: PLOT_WIDTH, height: PLOT_HEIGHT, draw_labels: true }
    }
}

/// Test-partition x values with the actual and predicted targets.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSeries {
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
}

impl ComparisonSeries {
    pub fn from_model(
        model: &dyn RegressionModel,
        split: &SplitPartition,
        x_label: &str,
        y_label: &str,
    ) -> Self {
        Self {
            x_label: x_label.to_owned(),
            y_label: y_label.to_owned(),
            x: split.x_test.clone(),
            actual: split.y_test.clone(),
            predicted: model.predict_all(&split.x_test),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn actual_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.actual.iter().copied())
    }

    /// Predicted points ordered by x, ready to be joined into a line.
    pub fn predicted_line(&self) -> Vec<(f64, f64)> {
        self.x
            .iter()
            .copied()
            .zip(self.predicted.iter().copied())
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .collect()
    }

    /// Padded `(x_range, y_range)` covering actual and predicted values.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let x = padded(self.x.iter().copied());
        let y = padded(self.actual.iter().chain(&self.predicted).copied());
        (x, y)
    }
}

fn padded(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = match values.filter(|v| v.is_finite()).minmax() {
        itertools::MinMaxResult::NoElements => return (0.0, 1.0),
        itertools::MinMaxResult::OneElement(v) => (v, v),
        itertools::MinMaxResult::MinMax(lo, hi) => (lo, hi),
    };
    let span = hi - lo;
    if span == 0.0 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

/// Sequential blue shade for `value` inside `[lo, hi]`.
fn shade(value: f64, lo: f64, hi: f64) -> RGBColor {
    let t = if hi > lo { ((value - lo) / (hi - lo)).clamp(0.0, 1.0) } else { 0.5 };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(LOW_COLOR.0, HIGH_COLOR.0),
        lerp(LOW_COLOR.1, HIGH_COLOR.1),
        lerp(LOW_COLOR.2, HIGH_COLOR.2),
    )
}

/// Writes the comparison plot to `path`; `.svg` selects the vector backend,
/// anything else is encoded as a bitmap.
pub fn render_comparison<P: AsRef<Path>>(
    series: &ComparisonSeries,
    path: P,
    options: &PlotOptions,
) -> Result<()> {
    let path = path.as_ref();
    let size = (options.width, options.height);
    let is_svg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    if is_svg {
        draw(SVGBackend::new(path, size).into_drawing_area(), series, options)?;
    } else {
        draw(BitMapBackend::new(path, size).into_drawing_area(), series, options)?;
    }
    tracing::info!("Comparison plot written to {}", path.display());
    Ok(())
}

fn plot_err<E: std::fmt::Display>(e: E) -> RegressionError {
    RegressionError::Plot(e.to_string())
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    series: &ComparisonSeries,
    options: &PlotOptions,
) -> Result<()> {
    root.fill(&WHITE).map_err(plot_err)?;

    let ((x_lo, x_hi), (y_lo, y_hi)) = series.bounds();
    let mut builder = ChartBuilder::on(&root);
    builder.margin(10);
    if options.draw_labels {
        builder
            .caption(format!("{} vs {}", series.y_label, series.x_label), ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut chart = builder.build_cartesian_2d(x_lo..x_hi, y_lo..y_hi).map_err(plot_err)?;

    if options.draw_labels {
        chart
            .configure_mesh()
            .x_desc(series.x_label.as_str())
            .y_desc(series.y_label.as_str())
            .draw()
            .map_err(plot_err)?;
    }

    let (a_lo, a_hi) = match series.actual.iter().copied().minmax() {
        itertools::MinMaxResult::MinMax(lo, hi) => (lo, hi),
        itertools::MinMaxResult::OneElement(v) => (v, v),
        itertools::MinMaxResult::NoElements => (0.0, 0.0),
    };
    let actual = chart
        .draw_series(
            series
                .actual_points()
                .map(|(x, y)| Circle::new((x, y), 4, shade(y, a_lo, a_hi).filled())),
        )
        .map_err(plot_err)?;
    if options.draw_labels {
        actual.label("Actual").legend(move |(x, y)| {
            Circle::new((x + 10, y), 4, shade(a_hi, a_lo, a_hi).filled())
        });
    }

    let predicted = chart
        .draw_series(LineSeries::new(series.predicted_line(), PREDICTED_COLOR.stroke_width(2)))
        .map_err(plot_err)?;
    if options.draw_labels {
        predicted.label("Predicted").legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], PREDICTED_COLOR.stroke_width(2))
        });
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegressionKind;
    use crate::split::train_test_split;
    use tempfile::tempdir;

    fn series() -> ComparisonSeries {
        let x: Vec<f64> = (0..20).map(|i| (19 - i) as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|v| 3.0 * v + if (*v as i64) % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let split = train_test_split(&x, &y, 0.3, 42).unwrap();
        let model = RegressionKind::Linear.fit(&split.x_train, &split.y_train).unwrap();
        ComparisonSeries::from_model(model.as_ref(), &split, "x", "y")
    }

    #[test]
    fn test_predicted_line_sorted() {
        let s = series();
        assert_eq!(s.len(), 6);
        let line = s.predicted_line();
        assert!(line.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(s.actual_points().count(), s.len());
    }

    #[test]
    fn test_bounds_cover_data() {
        let s = series();
        let ((x_lo, x_hi), (y_lo, y_hi)) = s.bounds();
        assert!(s.x.iter().all(|v| *v > x_lo && *v < x_hi));
        assert!(s.actual.iter().chain(&s.predicted).all(|v| *v > y_lo && *v < y_hi));
    }

    #[test]
    fn test_shade_endpoints() {
        assert_eq!(shade(0.0, 0.0, 1.0), RGBColor(198, 219, 239));
        assert_eq!(shade(1.0, 0.0, 1.0), RGBColor(8, 48, 107));
    }

    #[test]
    fn test_render_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("comparison.svg");
        let options = PlotOptions { draw_labels: false, ..Default::default() };

        render_comparison(&series(), &path, &options).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_render_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("comparison.png");
        let options = PlotOptions { width: 320, height: 240, draw_labels: false };

        render_comparison(&series(), &path, &options).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
