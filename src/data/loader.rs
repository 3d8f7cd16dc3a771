use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{DashError, Result};

use super::model::{CellValue, Column, Dataset};

/// Extension of the files offered for selection.
pub const DATASET_EXTENSION: &str = ".csv";

/// Cell contents read as missing values, matching the usual dataframe
/// defaults.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Dataset directory
// ---------------------------------------------------------------------------

/// Read-only access to the CSV files of one directory.
///
/// Nothing is cached: every call goes back to the file system.
#[derive(Debug, Clone)]
pub struct DatasetDir {
    root: PathBuf,
}

impl DatasetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Names of the `.csv` files in the directory, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.root).map_err(|source| DashError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(DATASET_EXTENSION))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Load `name` from the directory.
    ///
    /// Only names currently returned by [`DatasetDir::list`] are accepted,
    /// so a file removed since the listing reports `NotFound`.
    pub fn load(&self, name: &str) -> Result<Dataset> {
        if !self.list()?.iter().any(|n| n == name) {
            return Err(DashError::NotFound {
                name: name.to_string(),
            });
        }

        let path = self.root.join(name);
        let bytes = std::fs::read(&path).map_err(|source| DashError::Io {
            path: path.clone(),
            source,
        })?;
        let dataset = parse_csv(name, &bytes)?;
        log::info!(
            "Loaded {name}: {} rows, columns {:?}",
            dataset.len(),
            dataset.column_names()
        );
        Ok(dataset)
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV bytes into a [`Dataset`].
///
/// The first record is the header. Records shorter than the header are
/// padded with nulls; longer ones are an error.
pub fn parse_csv(name: &str, bytes: &[u8]) -> Result<Dataset> {
    let parse_error = |message: String| DashError::Parse {
        name: name.to_string(),
        message,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(format!("reading header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() || (headers.len() == 1 && headers[0].is_empty()) {
        return Err(parse_error("no columns to parse from file".to_string()));
    }

    let headers = dedup_headers(headers);
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|name| Column {
            name,
            cells: Vec::new(),
        })
        .collect();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| parse_error(format!("row {row_no}: {e}")))?;
        if record.len() > columns.len() {
            return Err(parse_error(format!(
                "row {row_no}: expected {} fields, saw {}",
                columns.len(),
                record.len()
            )));
        }
        for (idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(idx).map_or(CellValue::Null, parse_cell);
            column.cells.push(cell);
        }
    }

    Ok(Dataset {
        name: name.to_string(),
        columns,
    })
}

/// Repeated header names become `name.1`, `name.2`, ...
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .map(|header| {
            let mut candidate = header.clone();
            let mut n = 1;
            while seen.contains(&candidate) {
                candidate = format!("{header}.{n}");
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn parse_cell(raw: &str) -> CellValue {
    let s = raw.trim();
    if NULL_MARKERS.contains(&s) {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(raw.to_string())
}
