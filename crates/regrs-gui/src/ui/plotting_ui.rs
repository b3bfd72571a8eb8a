use egui::Color32;
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use regrs_core::ComparisonSeries;

const ACTUAL_COLOR: Color32 = Color32::from_rgb(33, 113, 181);
const PREDICTED_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

pub fn init_comparison_plot(series: &ComparisonSeries, w: f32, h: f32) -> Plot<'static> {
    Plot::new("comparison_plot")
        .width(w)
        .height(h)
        .allow_drag(true)
        .legend(Legend::default())
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
}

/// Test rows as points, the model's predictions over them as a line.
pub fn comparison_plot(ui: &mut egui::Ui, series: &ComparisonSeries, w: f32, h: f32) {
    let actual: Vec<[f64; 2]> = series.actual_points().map(|(x, y)| [x, y]).collect();
    let predicted: Vec<[f64; 2]> =
        series.predicted_line().into_iter().map(|(x, y)| [x, y]).collect();

    init_comparison_plot(series, w, h).show(ui, |plot_ui| {
        plot_ui.points(
            Points::new("Actual", PlotPoints::from(actual))
                .shape(MarkerShape::Circle)
                .color(ACTUAL_COLOR)
                .radius(3.0),
        );
        plot_ui.line(
            Line::new("Predicted", PlotPoints::from(predicted)).color(PREDICTED_COLOR).width(2.0),
        );
    });
}
