//! Delimited table loading.
//!
//! Only numeric columns are kept and every row with a missing value in one of
//! them is dropped, so every column of a [`Dataset`] has the same length and
//! holds only finite floats.

use crate::error::{RegressionError, Result};

use csv::StringRecord;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_DELIMITER: u8 = b',';

/// Cell contents treated as missing, compared after trimming.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: DEFAULT_DELIMITER }
    }
}

enum Cell {
    Missing,
    Number(f64),
    Text,
}

fn parse_cell(raw: &str) -> Cell {
    let s = raw.trim();
    if NA_VALUES.contains(&s) {
        return Cell::Missing;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        // inf, -inf, NaN and overflowing literals such as 1e400
        Ok(_) => Cell::Missing,
        Err(_) => Cell::Text,
    }
}

/// Gives every header a unique, non-empty name.
fn dedupe_headers(header: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(header.len());

    for (idx, raw) in header.iter().enumerate() {
        let base = match raw.trim() {
            "" => format!("Unnamed: {idx}"),
            name => name.to_owned(),
        };
        let mut name = base.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
    dropped_rows: usize,
    dropped_columns: Vec<String>,
}

impl Dataset {
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RegressionError::FileNotFound(path.to_path_buf()));
        }
        let file = File::open(path)
            .map_err(|source| RegressionError::Io { path: path.to_path_buf(), source })?;

        let dataset = Self::from_reader(file, options)?;
        tracing::info!(
            "Loaded {} rows x {} numeric columns from {}",
            dataset.n_rows(),
            dataset.n_columns(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R, options: &LoadOptions) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let names = dedupe_headers(rdr.headers()?);
        let width = names.len();

        let mut cells: Vec<Vec<Option<f64>>> = vec![Vec::new(); width];
        let mut numeric = vec![true; width];

        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            if record.len() > width {
                let row = record.position().map(|p| p.line() as usize).unwrap_or(i + 2);
                let found = record.len();
                return Err(RegressionError::RaggedRow { row, found, expected: width });
            }
            // short rows are padded with missing values
            for (col, column_cells) in cells.iter_mut().enumerate() {
                match parse_cell(record.get(col).unwrap_or("")) {
                    Cell::Missing => column_cells.push(None),
                    Cell::Number(v) => column_cells.push(Some(v)),
                    Cell::Text => {
                        numeric[col] = false;
                        column_cells.push(None);
                    },
                }
            }
        }

        let mut columns = Vec::new();
        let mut kept = Vec::new();
        let mut dropped_columns = Vec::new();
        for ((name, column_cells), is_numeric) in names.into_iter().zip(cells).zip(numeric) {
            if is_numeric {
                columns.push(name);
                kept.push(column_cells);
            } else {
                dropped_columns.push(name);
            }
        }

        if columns.is_empty() {
            return Err(RegressionError::NoNumericColumns);
        }
        if !dropped_columns.is_empty() {
            tracing::debug!("Dropped non-numeric columns: {:?}", dropped_columns);
        }

        let total_rows = kept[0].len();
        let complete: Vec<usize> =
            (0..total_rows).filter(|&row| kept.iter().all(|col| col[row].is_some())).collect();

        let values: Vec<Vec<f64>> = kept
            .iter()
            .map(|col| complete.iter().filter_map(|&row| col[row]).collect::<Vec<f64>>())
            .collect();

        Ok(Self {
            columns,
            values,
            dropped_rows: total_rows - complete.len(),
            dropped_columns,
        })
    }

    /// Builds a dataset from named columns, dropping rows with a NaN or
    /// infinite value.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(RegressionError::NoNumericColumns);
        }
        let (names, data): (Vec<String>, Vec<Vec<f64>>) =
            columns.into_iter().map(|(name, values)| (name.into(), values)).unzip();

        let expected = data[0].len();
        if let Some((name, col)) = names.iter().zip(&data).find(|(_, col)| col.len() != expected) {
            return Err(RegressionError::ColumnLength {
                name: name.clone(),
                found: col.len(),
                expected,
            });
        }

        let complete: Vec<usize> =
            (0..expected).filter(|&row| data.iter().all(|col| col[row].is_finite())).collect();
        let values: Vec<Vec<f64>> =
            data.iter().map(|col| complete.iter().map(|&row| col[row]).collect()).collect();

        Ok(Self {
            columns: names,
            values,
            dropped_rows: expected - complete.len(),
            dropped_columns: Vec::new(),
        })
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.iter().position(|c| c == name).map(|idx| self.values[idx].as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn n_rows(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Rows removed because one of their numeric cells was missing.
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }
}
