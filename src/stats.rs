use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::classify::is_numeric;
use crate::data::model::Dataset;
use crate::update::Update;

/// Row labels of a summary table, in display order.
pub const STATISTIC_NAMES: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Name of the column holding the statistic labels.
pub const INDEX_COLUMN: &str = "index";

// ---------------------------------------------------------------------------
// SummaryTable
// ---------------------------------------------------------------------------

/// One row of a [`SummaryTable`]: a statistic and its value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub statistic: &'static str,
    pub values: Vec<f64>,
}

/// Descriptive statistics of the numeric columns of a dataset.
///
/// The default value has no rows and stands for "nothing computed yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryTable {
    /// Numeric column names, one per value in each row.
    pub columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header labels including the leading index column.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(INDEX_COLUMN)
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    /// Row records `[{"index": "count", "<column>": value, ...}, ...]` as pretty JSON.
    /// Undefined statistics serialize as `null`.
    pub fn to_records_json(&self) -> serde_json::Result<String> {
        let records: Vec<Record<'_>> = self
            .rows
            .iter()
            .map(|row| Record {
                index: row.statistic,
                values: ColumnValues {
                    columns: &self.columns,
                    values: &row.values,
                },
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }
}

#[derive(serde::Serialize)]
struct Record<'a> {
    index: &'a str,
    #[serde(flatten)]
    values: ColumnValues<'a>,
}

/// Column values keyed by column name, in column order.
struct ColumnValues<'a> {
    columns: &'a [String],
    values: &'a [f64],
}

impl Serialize for ColumnValues<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            // serde_json writes non-finite floats as null
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Six decimals, `NaN` for undefined values.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Summarize every numeric column of `dataset`; other columns are left out.
pub fn summarize(dataset: &Dataset) -> SummaryTable {
    let numeric: Vec<_> = dataset.columns.iter().filter(|c| is_numeric(c)).collect();
    let described: Vec<[f64; 8]> = numeric.iter().map(|c| describe(&c.numeric_values())).collect();

    let rows = STATISTIC_NAMES
        .iter()
        .enumerate()
        .map(|(i, &statistic)| SummaryRow {
            statistic,
            values: described.iter().map(|d| d[i]).collect(),
        })
        .collect();

    SummaryTable {
        columns: numeric.iter().map(|c| c.name.clone()).collect(),
        rows,
    }
}

/// Like [`summarize`], but with no dataset the displayed table stays as is.
pub fn summarize_selected(dataset: Option<&Dataset>) -> Update<SummaryTable> {
    match dataset {
        Some(ds) => Update::Set(summarize(ds)),
        None => Update::Unchanged,
    }
}

/// count, mean, std, min, 25%, 50%, 75%, max of the non-null values.
fn describe(values: &[f64]) -> [f64; 8] {
    let n = values.len();
    if n == 0 {
        return [0.0, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = if n < 2 {
        f64::NAN
    } else {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    [
        n as f64,
        mean,
        std,
        sorted[0],
        quantile_sorted(&sorted, 0.25),
        quantile_sorted(&sorted, 0.50),
        quantile_sorted(&sorted, 0.75),
        sorted[n - 1],
    ]
}

/// Quantile of ascending `sorted` with linear interpolation between the
/// closest ranks. NaN for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
