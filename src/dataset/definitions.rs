// src/dataset/definitions.rs
use std::path::PathBuf;

/// Column name the multivariate view aggregates.
pub const DEATHS_COLUMN: &str = "Number_of_Deaths";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    /// Free text or category labels.
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn kind(&self) -> ColumnKind {
        match self.values {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match &self.values {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn numeric(&self) -> Option<&[Option<f64>]> {
        match &self.values {
            ColumnValues::Numeric(v) => Some(v),
            ColumnValues::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&[Option<String>]> {
        match &self.values {
            ColumnValues::Categorical(v) => Some(v),
            ColumnValues::Numeric(_) => None,
        }
    }

    /// Display text for one cell; `None` for a missing value.
    pub fn cell_text(&self, row: usize) -> Option<String> {
        match &self.values {
            ColumnValues::Numeric(v) => v.get(row).copied().flatten().map(format_number),
            ColumnValues::Categorical(v) => v.get(row).cloned().flatten(),
        }
    }

    /// Non-missing numeric values in row order.
    pub fn present_numbers(&self) -> Vec<f64> {
        self.numeric()
            .map(|v| v.iter().filter_map(|x| *x).collect())
            .unwrap_or_default()
    }
}

/// A parsed data table. Every column has the same number of rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl DataTable {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn names_of_kind(&self, kind: ColumnKind) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.kind() == kind)
            .map(|c| c.name.clone())
            .collect()
    }

    /// Row cells as display strings, missing values rendered as `NaN`.
    pub fn row_texts(&self, row: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.cell_text(row).unwrap_or_else(|| "NaN".to_string()))
            .collect()
    }

    /// Indices of the first `n` rows.
    pub fn head_rows(&self, n: usize) -> std::ops::Range<usize> {
        0..n.min(self.row_count)
    }

    /// Indices of the last `n` rows.
    pub fn tail_rows(&self, n: usize) -> std::ops::Range<usize> {
        self.row_count.saturating_sub(n)..self.row_count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Found by the startup search.
    Startup,
    /// Picked by the user through the upload dialog.
    Upload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub table: DataTable,
    pub path: PathBuf,
    pub origin: DataOrigin,
}

/// Formats a number the way the dashboard shows values: integers without a
/// fractional part, everything else with up to six significant decimals.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
