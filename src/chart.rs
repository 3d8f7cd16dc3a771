use std::fmt;

use eframe::egui::Color32;

use crate::color::series_color;
use crate::data::classify::numeric_columns;
use crate::data::model::Dataset;
use crate::stats::quantile_sorted;

// ---------------------------------------------------------------------------
// Chart kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Scatter,
    Box,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Scatter, ChartKind::Box];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line",
            ChartKind::Scatter => "Scatter",
            ChartKind::Box => "Box",
        }
    }

    /// Box plots only consume a y column.
    pub fn uses_x(self) -> bool {
        !matches!(self, ChartKind::Box)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the chart-kind selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindOption {
    pub kind: ChartKind,
    pub label: &'static str,
}

/// The chart kinds offered once a file is selected.
pub fn available_chart_kinds(dataset_selected: bool) -> Vec<KindOption> {
    if !dataset_selected {
        return Vec::new();
    }
    ChartKind::ALL
        .into_iter()
        .map(|kind| KindOption {
            kind,
            label: kind.label(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Axis options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisOptions {
    pub x_options: Vec<String>,
    pub y_options: Vec<String>,
    pub x_visible: bool,
}

/// Columns selectable for each axis given the dataset and chart kind.
pub fn axis_options(dataset: Option<&Dataset>, kind: Option<ChartKind>) -> AxisOptions {
    let (Some(ds), Some(kind)) = (dataset, kind) else {
        return AxisOptions::default();
    };
    let numeric = numeric_columns(ds);
    if kind.uses_x() {
        AxisOptions {
            x_options: numeric.clone(),
            y_options: numeric,
            x_visible: true,
        }
    } else {
        AxisOptions {
            x_options: Vec::new(),
            y_options: numeric,
            x_visible: false,
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// Kind plus axis columns of one chart.
///
/// Only built through [`ChartSpec::new`], so every named column is a
/// numeric column of the dataset it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSpec {
    /// `x: None` plots `y` against the row position.
    Line { x: Option<String>, y: String },
    Scatter { x: Option<String>, y: String },
    Box { y: String },
}

impl ChartSpec {
    /// Validate the axes against `numeric` column names. `x` is ignored for
    /// box plots and optional for the others.
    pub fn new(kind: ChartKind, x: Option<&str>, y: &str, numeric: &[String]) -> Option<Self> {
        let known = |name: &str| !name.is_empty() && numeric.iter().any(|n| n == name);
        if !known(y) {
            return None;
        }
        let y = y.to_string();
        if kind == ChartKind::Box {
            return Some(ChartSpec::Box { y });
        }
        let x = match x {
            Some(name) if !known(name) => return None,
            other => other.map(str::to_string),
        };
        Some(match kind {
            ChartKind::Line => ChartSpec::Line { x, y },
            _ => ChartSpec::Scatter { x, y },
        })
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartSpec::Line { .. } => ChartKind::Line,
            ChartSpec::Scatter { .. } => ChartKind::Scatter,
            ChartSpec::Box { .. } => ChartKind::Box,
        }
    }

    pub fn x(&self) -> Option<&str> {
        match self {
            ChartSpec::Line { x, .. } | ChartSpec::Scatter { x, .. } => x.as_deref(),
            ChartSpec::Box { .. } => None,
        }
    }

    pub fn y(&self) -> &str {
        match self {
            ChartSpec::Line { y, .. } | ChartSpec::Scatter { y, .. } | ChartSpec::Box { y } => y,
        }
    }

    /// Axis title for x: the column name, or `index` when plotting by row.
    pub fn x_title(&self) -> &str {
        self.x().unwrap_or("index")
    }
}

// ---------------------------------------------------------------------------
// Figure – a spec with its data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    /// (x, y) pairs in row order.
    Points(Vec<[f64; 2]>),
    /// Non-null y values, ascending.
    Distribution(Vec<f64>),
}

/// Everything needed to draw one chart, on screen or into an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub spec: ChartSpec,
    pub series: Series,
    pub color: Color32,
}

impl Figure {
    /// Extract the data for `spec` from `dataset`. Rows with a null on a
    /// plotted axis are skipped.
    pub fn from_dataset(dataset: &Dataset, spec: ChartSpec) -> Self {
        let numeric = numeric_columns(dataset);
        let position = numeric.iter().position(|n| n == spec.y()).unwrap_or(0);
        let color = series_color(position, numeric.len());

        let column_values = |name: &str| -> Vec<Option<f64>> {
            dataset
                .column(name)
                .map(|c| c.cells.iter().map(|v| v.as_f64()).collect())
                .unwrap_or_default()
        };
        let ys = column_values(spec.y());

        let series = match &spec {
            ChartSpec::Box { .. } => {
                let mut values: Vec<f64> = ys.into_iter().flatten().collect();
                values.sort_by(f64::total_cmp);
                Series::Distribution(values)
            }
            _ => {
                let xs: Vec<Option<f64>> = match spec.x() {
                    Some(name) => column_values(name),
                    None => (0..ys.len()).map(|i| Some(i as f64)).collect(),
                };
                let points = xs
                    .into_iter()
                    .zip(ys)
                    .filter_map(|(x, y)| Some([x?, y?]))
                    .collect();
                Series::Points(points)
            }
        };

        Figure {
            spec,
            series,
            color,
        }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        match &self.series {
            Series::Points(points) => points,
            Series::Distribution(_) => &[],
        }
    }

    pub fn box_stats(&self) -> Option<BoxStats> {
        match &self.series {
            Series::Distribution(values) => BoxStats::from_sorted(values),
            Series::Points(_) => None,
        }
    }
}

/// Build the chart for the current selections, or `None` when the inputs
/// are insufficient.
///
/// Line and scatter charts are still built without an x column.
pub fn build_chart(
    dataset: Option<&Dataset>,
    kind: Option<ChartKind>,
    x: Option<&str>,
    y: Option<&str>,
) -> Option<Figure> {
    let (ds, kind, y) = (dataset?, kind?, y?);
    let numeric = numeric_columns(ds);
    match ChartSpec::new(kind, x, y, &numeric) {
        Some(spec) => Some(Figure::from_dataset(ds, spec)),
        None => {
            log::warn!("Cannot build {kind} chart of {} for x={x:?}, y={y:?}", ds.name);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Quartiles and Tukey whiskers of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest value within 1.5·IQR below q1.
    pub lower_whisker: f64,
    /// Largest value within 1.5·IQR above q3.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `sorted` must be ascending. `None` when empty.
    pub fn from_sorted(sorted: &[f64]) -> Option<Self> {
        if sorted.is_empty() {
            return None;
        }
        let q1 = quantile_sorted(sorted, 0.25);
        let median = quantile_sorted(sorted, 0.5);
        let q3 = quantile_sorted(sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = || sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside().next().unwrap_or(q1);
        let upper_whisker = inside().last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
