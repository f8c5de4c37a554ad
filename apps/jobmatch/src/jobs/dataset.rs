//! Job dataset: a CSV file of job listings loaded into memory as ordered rows.
//!
//! Every cell is kept as text. Empty cells and the usual null spellings
//! (`NA`, `N/A`, `NaN`, `null`, ...) are treated as missing (`None`).
//! Row order is the file order and is never changed after load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// One dataset row as a column-name → value mapping, in header order.
pub type Record = Map<String, Value>;

/// Cell values read as missing. Matched exactly, case-sensitive, the same
/// set pandas' `read_csv` uses by default.
pub const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone)]
pub struct JobDataset {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl JobDataset {
    /// Reads the whole CSV file at `path`. The first line is the header.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let malformed = |source: csv::Error| DatasetError::Malformed {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv_reader(file);
        let columns = dedup_column_names(reader.headers().map_err(malformed)?.iter());

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        debug!(
            "Loaded {} rows x {} columns from {}",
            rows.len(),
            columns.len(),
            path.display()
        );

        Ok(Self { columns, rows })
    }

    /// Reads only the header line of the CSV file at `path`, with the same
    /// column naming as [`JobDataset::load`]. Data rows are not parsed.
    pub fn read_columns(path: impl AsRef<Path>) -> Result<Vec<String>, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv_reader(file);
        let headers = reader.headers().map_err(|source| DatasetError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(dedup_column_names(headers.iter()))
    }

    /// Builds a dataset from in-memory parts. Short rows are padded with `None`.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of a single column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows.iter().map(move |row| row[index].as_deref())
    }

    /// Full copy of row `index` with every column, nulls included.
    pub fn record(&self, index: usize) -> Record {
        self.columns
            .iter()
            .zip(&self.rows[index])
            .map(|(column, value)| {
                let value = value.clone().map(Value::String).unwrap_or(Value::Null);
                (column.clone(), value)
            })
            .collect()
    }
}

fn csv_reader(file: std::fs::File) -> csv::Reader<std::fs::File> {
    csv::ReaderBuilder::new().has_headers(true).from_reader(file)
}

fn parse_cell(cell: &str) -> Option<String> {
    (!NULL_TOKENS.contains(&cell)).then(|| cell.to_string())
}

/// Repeated header names become `name`, `name.1`, `name.2`, ... so every
/// column stays addressable. A generated name that is already taken gets
/// suffixed again (`a,a.1,a` becomes `a`, `a.1`, `a.1.1`), as pandas does.
fn dedup_column_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::new();
    for name in names {
        let mut column = name.to_string();
        let mut count = counts.get(&column).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(column.clone(), count + 1);
            column = format!("{column}.{count}");
            count = counts.get(&column).copied().unwrap_or(0);
        }
        counts.insert(column.clone(), count + 1);
        columns.push(column);
    }
    columns
}
