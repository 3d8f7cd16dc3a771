use eframe::egui::Ui;
use egui_plot::{BoxElem, BoxPlot, BoxSpread, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::{ChartKind, Series};
use crate::controller::Session;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current figure, or a hint about what is still missing.
pub fn figure_plot(ui: &mut Ui, session: &Session) {
    let Some(figure) = &session.view.figure else {
        let selection = &session.selection;
        let hint = if selection.file.is_none() {
            "Select a file to explore"
        } else if selection.kind.is_none() {
            "Select a graph type"
        } else {
            "Select the axis columns"
        };
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(hint);
        });
        return;
    };

    let spec = &figure.spec;
    let name = spec.y();

    Plot::new("figure_plot")
        .legend(Legend::default())
        .x_axis_label(spec.x_title())
        .y_axis_label(spec.y())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match &figure.series {
            Series::Points(_) => {
                let points: PlotPoints = figure.points().iter().copied().collect();
                if spec.kind() == ChartKind::Line {
                    plot_ui.line(Line::new(points).name(name).color(figure.color).width(1.5));
                } else {
                    plot_ui.points(Points::new(points).name(name).color(figure.color).radius(3.0));
                }
            }
            Series::Distribution(_) => {
                let Some(stats) = figure.box_stats() else {
                    return;
                };
                let spread = BoxSpread::new(
                    stats.lower_whisker,
                    stats.q1,
                    stats.median,
                    stats.q3,
                    stats.upper_whisker,
                );
                let elem = BoxElem::new(0.0, spread).name(name).box_width(0.5);
                plot_ui.box_plot(BoxPlot::new(vec![elem]).name(name).color(figure.color));

                if !stats.outliers.is_empty() {
                    let outliers: PlotPoints = stats.outliers.iter().map(|&v| [0.0, v]).collect();
                    let points = Points::new(outliers).name(name).color(figure.color);
                    plot_ui.points(points.radius(3.0));
                }
            }
        });
}
