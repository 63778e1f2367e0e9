// src/dataset/systems/analysis/grouping.rs
//! Grouped aggregates behind the bivariate and multivariate views.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::dataset::definitions::{format_number, Column, ColumnKind, DataTable, DEATHS_COLUMN};
use crate::dataset::error::ViewError;

use super::frame::TextFrame;

/// One aggregated bar: group label, optional series (color) label, value.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub x: String,
    pub series: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    /// Number of rows per (x, series) pair.
    Count,
    /// Sum of a numeric column per group.
    Sum,
}

/// An aggregated, sorted view ready for charting and prompting.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedView {
    pub title: String,
    pub x_column: String,
    /// Column whose values color the bars, if any.
    pub series_column: Option<String>,
    /// Header of the value column (`count`, `Sum_Value`, or the summed column).
    pub value_label: String,
    pub measure: Measure,
    pub rows: Vec<GroupedRow>,
}

impl GroupedView {
    pub fn to_frame(&self) -> TextFrame {
        let mut columns = vec![self.x_column.clone()];
        if let Some(series) = &self.series_column {
            columns.push(series.clone());
        }
        columns.push(self.value_label.clone());

        let rows = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.x.clone()];
                if let Some(s) = &r.series {
                    cells.push(s.clone());
                }
                cells.push(match self.measure {
                    Measure::Count => format!("{}", r.value as u64),
                    Measure::Sum => format_number(r.value),
                });
                cells
            })
            .collect();
        TextFrame::with_row_numbers(columns, rows)
    }
}

#[derive(Debug, Clone)]
struct GroupKey {
    text: String,
    number: Option<f64>,
}

impl GroupKey {
    fn at(column: &Column, row: usize) -> Option<Self> {
        let text = column.cell_text(row)?;
        let number = column.numeric().and_then(|v| v.get(row).copied().flatten());
        Some(Self { text, number })
    }

    fn order(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            _ => self.text.cmp(&other.text),
        }
    }
}

struct Accumulator {
    groups: Vec<(GroupKey, Option<GroupKey>, f64)>,
    positions: HashMap<(String, Option<String>), usize>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn add(&mut self, x: GroupKey, series: Option<GroupKey>, amount: f64) {
        let id = (x.text.clone(), series.as_ref().map(|s| s.text.clone()));
        match self.positions.get(&id) {
            Some(&pos) => self.groups[pos].2 += amount,
            None => {
                self.positions.insert(id, self.groups.len());
                self.groups.push((x, series, amount));
            }
        }
    }

    /// Groups in key order, then stably sorted by value, largest first.
    fn into_sorted_rows(mut self) -> Vec<GroupedRow> {
        self.groups.sort_by(|a, b| {
            a.0.order(&b.0).then_with(|| match (&a.1, &b.1) {
                (Some(sa), Some(sb)) => sa.order(sb),
                _ => Ordering::Equal,
            })
        });
        let mut rows: Vec<GroupedRow> = self
            .groups
            .into_iter()
            .map(|(x, series, value)| GroupedRow {
                x: x.text,
                series: series.map(|s| s.text),
                value,
            })
            .collect();
        rows.sort_by(|a, b| b.value.total_cmp(&a.value));
        rows
    }
}

fn column<'a>(table: &'a DataTable, name: &str) -> Result<&'a Column, ViewError> {
    table
        .column(name)
        .ok_or_else(|| ViewError::ColumnNotFound(name.to_string()))
}

/// Bivariate aggregate of `x` against `y`.
///
/// A categorical `y` counts rows per (x, y) pair and colors by `y`; a numeric
/// `y` sums it per `x`. Rows with a missing group key are dropped.
pub fn bivariate(table: &DataTable, x: &str, y: &str) -> Result<GroupedView, ViewError> {
    if x == y {
        return Err(ViewError::SameColumns);
    }
    let x_col = column(table, x)?;
    let y_col = column(table, y)?;
    let mut acc = Accumulator::new();

    match y_col.kind() {
        ColumnKind::Categorical => {
            for row in 0..table.row_count {
                if let (Some(xk), Some(yk)) = (GroupKey::at(x_col, row), GroupKey::at(y_col, row)) {
                    acc.add(xk, Some(yk), 1.0);
                }
            }
            Ok(GroupedView {
                title: format!("Distribution of {} grouped by {}", x, y),
                x_column: x.to_string(),
                series_column: Some(y.to_string()),
                value_label: "count".to_string(),
                measure: Measure::Count,
                rows: acc.into_sorted_rows(),
            })
        }
        ColumnKind::Numeric => {
            let values = y_col.numeric().unwrap_or_default();
            for row in 0..table.row_count {
                if let Some(xk) = GroupKey::at(x_col, row) {
                    let amount = values.get(row).copied().flatten().unwrap_or(0.0);
                    acc.add(xk, None, amount);
                }
            }
            Ok(GroupedView {
                title: format!("Total {} by {}", y, x),
                x_column: x.to_string(),
                series_column: None,
                value_label: "Sum_Value".to_string(),
                measure: Measure::Sum,
                rows: acc.into_sorted_rows(),
            })
        }
    }
}

/// Sum of the deaths column per (x, hue) pair.
pub fn multivariate(table: &DataTable, x: &str, hue: &str) -> Result<GroupedView, ViewError> {
    if x == hue {
        return Err(ViewError::SameColumns);
    }
    let deaths = column(table, DEATHS_COLUMN)?;
    let values = deaths
        .numeric()
        .ok_or_else(|| ViewError::NotNumeric(DEATHS_COLUMN.to_string()))?;
    let x_col = column(table, x)?;
    let hue_col = column(table, hue)?;

    let mut acc = Accumulator::new();
    for row in 0..table.row_count {
        if let (Some(xk), Some(hk)) = (GroupKey::at(x_col, row), GroupKey::at(hue_col, row)) {
            acc.add(xk, Some(hk), values.get(row).copied().flatten().unwrap_or(0.0));
        }
    }
    Ok(GroupedView {
        title: format!("{} by {} and {}", DEATHS_COLUMN, x, hue),
        x_column: x.to_string(),
        series_column: Some(hue.to_string()),
        value_label: DEATHS_COLUMN.to_string(),
        measure: Measure::Sum,
        rows: acc.into_sorted_rows(),
    })
}
