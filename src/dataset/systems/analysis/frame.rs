// src/dataset/systems/analysis/frame.rs
use std::ops::Range;

use crate::dataset::definitions::DataTable;

/// A small labelled grid of display strings.
///
/// Used both for on-screen tables and for the text embedded in AI prompts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFrame {
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextFrame {
    /// Frame with a numeric 0-based index.
    pub fn with_row_numbers(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let index = (0..rows.len()).map(|i| i.to_string()).collect();
        Self { columns, index, rows }
    }

    /// Rows of a table in the given range, indexed by their row position.
    pub fn from_table_rows(table: &DataTable, rows: Range<usize>) -> Self {
        Self {
            columns: table.column_names(),
            index: rows.clone().map(|i| i.to_string()).collect(),
            rows: rows.map(|i| table.row_texts(i)).collect(),
        }
    }

    pub fn head(&self, n: usize) -> Self {
        let n = n.min(self.rows.len());
        Self {
            columns: self.columns.clone(),
            index: self.index[..n].to_vec(),
            rows: self.rows[..n].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Plain-text rendering: index left-aligned, values right-aligned,
    /// columns separated by two spaces.
    pub fn to_text(&self) -> String {
        let index_width = self.index.iter().map(|s| s.chars().count()).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, header)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(c))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut header = format!("{:<width$}", "", width = index_width);
        for (c, name) in self.columns.iter().enumerate() {
            header.push_str(&format!("  {:>width$}", name, width = widths[c]));
        }
        lines.push(header);

        for (i, row) in self.rows.iter().enumerate() {
            let label = self.index.get(i).map(String::as_str).unwrap_or("");
            let mut line = format!("{:<width$}", label, width = index_width);
            for (c, width) in widths.iter().enumerate() {
                let value = row.get(c).map(String::as_str).unwrap_or("");
                line.push_str(&format!("  {:>width$}", value, width = *width));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}
