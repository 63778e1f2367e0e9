// src/dataset/systems/analysis/describe.rs
//! Summary statistics for the overview tab and numeric prompts.

use crate::dataset::definitions::{format_number, Column, ColumnKind, DataTable};

use super::counts::value_counts;
use super::frame::TextFrame;

const NUMERIC_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
const CATEGORICAL_LABELS: [&str; 4] = ["count", "unique", "top", "freq"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summary of the present values; statistics are NaN when there are none.
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let count = sorted.len();
        let mean = if count == 0 {
            f64::NAN
        } else {
            sorted.iter().sum::<f64>() / count as f64
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        };
        Self {
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    fn cells(&self) -> [String; 8] {
        [
            self.count.to_string(),
            format_number(self.mean),
            format_number(self.std),
            format_number(self.min),
            format_number(self.q1),
            format_number(self.median),
            format_number(self.q3),
            format_number(self.max),
        ]
    }
}

/// Linear-interpolation quantile of already sorted values.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn categorical_cells(column: &Column) -> [String; 4] {
    let counts = value_counts(column);
    let present: usize = counts.iter().map(|(_, n)| n).sum();
    match counts.first() {
        Some((top, freq)) => [
            present.to_string(),
            counts.len().to_string(),
            top.clone(),
            freq.to_string(),
        ],
        None => ["0".into(), "0".into(), "NaN".into(), "NaN".into()],
    }
}

/// Statistical summary of a table.
///
/// Describes the numeric columns; when the table has none, falls back to
/// count/unique/top/freq over the categorical columns.
pub fn describe_table(table: &DataTable) -> TextFrame {
    let numeric: Vec<&Column> = table
        .columns
        .iter()
        .filter(|c| c.kind() == ColumnKind::Numeric)
        .collect();

    if !numeric.is_empty() {
        let summaries: Vec<[String; 8]> = numeric
            .iter()
            .map(|c| NumericSummary::from_values(&c.present_numbers()).cells())
            .collect();
        return TextFrame {
            columns: numeric.iter().map(|c| c.name.clone()).collect(),
            index: NUMERIC_LABELS.iter().map(|s| s.to_string()).collect(),
            rows: (0..NUMERIC_LABELS.len())
                .map(|r| summaries.iter().map(|s| s[r].clone()).collect())
                .collect(),
        };
    }

    let summaries: Vec<[String; 4]> = table.columns.iter().map(categorical_cells).collect();
    TextFrame {
        columns: table.column_names(),
        index: CATEGORICAL_LABELS.iter().map(|s| s.to_string()).collect(),
        rows: (0..CATEGORICAL_LABELS.len())
            .map(|r| summaries.iter().map(|s| s[r].clone()).collect())
            .collect(),
    }
}

/// Summary of a single column, one statistic per row.
pub fn describe_column(column: &Column) -> TextFrame {
    let (labels, cells): (&[&str], Vec<String>) = match column.kind() {
        ColumnKind::Numeric => (
            &NUMERIC_LABELS[..],
            NumericSummary::from_values(&column.present_numbers()).cells().to_vec(),
        ),
        ColumnKind::Categorical => (&CATEGORICAL_LABELS[..], categorical_cells(column).to_vec()),
    };
    TextFrame {
        columns: vec![column.name.clone()],
        index: labels.iter().map(|s| s.to_string()).collect(),
        rows: cells.into_iter().map(|c| vec![c]).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::definitions::ColumnValues;

    fn numeric(name: &str, values: &[Option<f64>]) -> Column {
        Column {
            name: name.into(),
            values: ColumnValues::Numeric(values.to_vec()),
        }
    }

    fn categorical(name: &str, values: &[&str]) -> Column {
        Column {
            name: name.into(),
            values: ColumnValues::Categorical(values.iter().map(|v| Some(v.to_string())).collect()),
        }
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 1.75);
        assert_eq!(quantile_sorted(&sorted, 0.5), 2.5);
        assert_eq!(quantile_sorted(&sorted, 0.75), 3.25);
        assert_eq!(quantile_sorted(&[7.0], 0.75), 7.0);
        assert!(quantile_sorted(&[], 0.5).is_nan());
    }

    #[test]
    fn numeric_summary_uses_sample_std() {
        let s = NumericSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(s.count, 8);
        assert_eq!(s.mean, 5.0);
        assert!((s.std - 2.138089935299395).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.median, 4.5);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn single_value_has_nan_std() {
        let s = NumericSummary::from_values(&[3.0]);
        assert!(s.std.is_nan());
        assert_eq!(s.q1, 3.0);
    }

    #[test]
    fn describe_table_covers_numeric_columns_only() {
        let table = DataTable {
            columns: vec![
                categorical("Cause", &["Malaria", "Stroke", "Malaria"]),
                numeric("Number_of_Deaths", &[Some(10.0), None, Some(30.0)]),
            ],
            row_count: 3,
        };
        let frame = describe_table(&table);
        assert_eq!(frame.columns, vec!["Number_of_Deaths"]);
        assert_eq!(frame.index, NUMERIC_LABELS.map(String::from).to_vec());
        assert_eq!(frame.rows[0], vec!["2"]);
        assert_eq!(frame.rows[1], vec!["20"]);
        assert_eq!(frame.rows[3], vec!["10"]);
        assert_eq!(frame.rows[7], vec!["30"]);
    }

    #[test]
    fn describe_table_falls_back_to_categorical_summary() {
        let table = DataTable {
            columns: vec![categorical("Cause", &["Stroke", "Malaria", "Malaria"])],
            row_count: 3,
        };
        let frame = describe_table(&table);
        assert_eq!(frame.index, vec!["count", "unique", "top", "freq"]);
        let cells: Vec<&str> = frame.rows.iter().map(|r| r[0].as_str()).collect();
        assert_eq!(cells, vec!["3", "2", "Malaria", "2"]);
    }

    #[test]
    fn describe_column_is_one_statistic_per_row() {
        let frame = describe_column(&numeric("Age", &[Some(1.0), Some(3.0)]));
        assert_eq!(frame.columns, vec!["Age"]);
        assert_eq!(frame.rows.len(), 8);
        assert_eq!(frame.rows[1], vec!["2"]);
    }
}
