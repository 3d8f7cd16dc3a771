use std::fmt::Display;
use std::io::Cursor;
use std::ops::Range;

use plotters::prelude::*;

use crate::chart::{BoxStats, ChartKind, Figure, Series};
use crate::error::{DashError, Result};

/// Turns a [`Figure`] into PNG bytes.
pub trait Rasterize {
    fn rasterize(&self, figure: &Figure) -> Result<Vec<u8>>;
}

/// Draws figures with the plotters bitmap backend into an in-memory RGB
/// buffer, then PNG-encodes it.
#[derive(Debug, Clone, Copy)]
pub struct PlottersRasterizer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRasterizer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

fn render_error(e: impl Display) -> DashError {
    DashError::Render(e.to_string())
}

/// Grid divisions per axis.
const GRID_DIVISIONS: usize = 5;

/// Largest magnitude kept for an axis end, so the span stays finite.
const AXIS_LIMIT: f64 = f64::MAX / 4.0;

impl Rasterize for PlottersRasterizer {
    fn rasterize(&self, figure: &Figure) -> Result<Vec<u8>> {
        let (w, h) = (self.width, self.height);
        if w == 0 || h == 0 {
            return Err(DashError::Render(format!("invalid image size {w}x{h}")));
        }

        // The image carries no text: plotters is built without a font backend.
        let mut buffer = vec![0u8; w as usize * h as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;
            let c = figure.color;
            let color = RGBColor(c.r(), c.g(), c.b());

            match &figure.series {
                Series::Points(points) => {
                    let points: Vec<(f64, f64)> = points
                        .iter()
                        .filter(|p| p[0].is_finite() && p[1].is_finite())
                        .map(|p| (clamp_axis(p[0]), clamp_axis(p[1])))
                        .collect();
                    let x_range = padded_range(points.iter().map(|p| p.0));
                    let y_range = padded_range(points.iter().map(|p| p.1));
                    let grid = grid_lines(&x_range, &y_range, true);

                    let mut chart = ChartBuilder::on(&root)
                        .margin(20)
                        .build_cartesian_2d(x_range, y_range)
                        .map_err(render_error)?;
                    chart
                        .draw_series(
                            grid.into_iter()
                                .map(|l| PathElement::new(l, BLACK.mix(0.15).stroke_width(1))),
                        )
                        .map_err(render_error)?;

                    if figure.spec.kind() == ChartKind::Line {
                        chart
                            .draw_series(LineSeries::new(points, color.stroke_width(2)))
                            .map_err(render_error)?;
                    } else {
                        chart
                            .draw_series(
                                points
                                    .into_iter()
                                    .map(|p| Circle::new(p, 3, color.filled())),
                            )
                            .map_err(render_error)?;
                    }
                }
                Series::Distribution(values) => {
                    let finite: Vec<f64> = values
                        .iter()
                        .copied()
                        .filter(|v| v.is_finite())
                        .map(clamp_axis)
                        .collect();
                    let x_range = -1f64..1f64;
                    let y_range = padded_range(finite.iter().copied());
                    let grid = grid_lines(&x_range, &y_range, false);

                    let mut chart = ChartBuilder::on(&root)
                        .margin(20)
                        .build_cartesian_2d(x_range, y_range)
                        .map_err(render_error)?;
                    chart
                        .draw_series(
                            grid.into_iter()
                                .map(|l| PathElement::new(l, BLACK.mix(0.15).stroke_width(1))),
                        )
                        .map_err(render_error)?;

                    if let Some(stats) = BoxStats::from_sorted(&finite) {
                        let body = [(-0.3, stats.q1), (0.3, stats.q3)];
                        let fill = color.mix(0.3).filled();
                        chart
                            .draw_series(std::iter::once(Rectangle::new(body, fill)))
                            .map_err(render_error)?;
                        chart
                            .draw_series(std::iter::once(Rectangle::new(
                                body,
                                color.stroke_width(2),
                            )))
                            .map_err(render_error)?;

                        let (lo, hi) = (stats.lower_whisker, stats.upper_whisker);
                        let lines = vec![
                            vec![(-0.3, stats.median), (0.3, stats.median)],
                            vec![(0.0, stats.q3), (0.0, hi)],
                            vec![(0.0, stats.q1), (0.0, lo)],
                            vec![(-0.15, hi), (0.15, hi)],
                            vec![(-0.15, lo), (0.15, lo)],
                        ];
                        chart
                            .draw_series(
                                lines
                                    .into_iter()
                                    .map(|l| PathElement::new(l, color.stroke_width(2))),
                            )
                            .map_err(render_error)?;
                        chart
                            .draw_series(
                                stats
                                    .outliers
                                    .iter()
                                    .map(|&v| Circle::new((0.0, v), 3, color.filled())),
                            )
                            .map_err(render_error)?;
                    }
                }
            }

            root.present().map_err(render_error)?;
        }

        let image = image::RgbImage::from_raw(w, h, buffer)
            .ok_or_else(|| DashError::Render("bitmap buffer size mismatch".to_string()))?;
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(render_error)?;
        Ok(png)
    }
}

/// Frame and evenly spaced grid lines in data coordinates. Vertical lines
/// are left out when `vertical` is false.
fn grid_lines(x: &Range<f64>, y: &Range<f64>, vertical: bool) -> Vec<Vec<(f64, f64)>> {
    let n = GRID_DIVISIONS as f64;
    let x_step = x.end / n - x.start / n;
    let y_step = y.end / n - y.start / n;

    let mut lines: Vec<Vec<(f64, f64)>> = (0..=GRID_DIVISIONS)
        .map(|i| y.start + y_step * i as f64)
        .map(|yv| vec![(x.start, yv), (x.end, yv)])
        .collect();
    if vertical {
        lines.extend(
            (0..=GRID_DIVISIONS)
                .map(|i| x.start + x_step * i as f64)
                .map(|xv| vec![(xv, y.start), (xv, y.end)]),
        );
    } else {
        lines.push(vec![(x.start, y.start), (x.start, y.end)]);
        lines.push(vec![(x.end, y.start), (x.end, y.end)]);
    }
    lines
}

/// Data bounds with 5% padding; a small range around a single value, and
/// `0..1` when there is no data. Ends are clamped so `end - start` is finite.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let half_span = max / 2.0 - min / 2.0;
    let pad = if half_span > 0.0 {
        half_span * 0.1
    } else {
        (min.abs() * 0.05).max(0.5)
    };
    clamp_axis(min - pad)..clamp_axis(max + pad)
}

/// Values beyond the limit are drawn on the limit, keeping every pixel
/// coordinate on the canvas.
fn clamp_axis(v: f64) -> f64 {
    v.clamp(-AXIS_LIMIT, AXIS_LIMIT)
}
