// src/dataset/systems/analysis/counts.rs
use std::collections::HashMap;

use crate::dataset::definitions::Column;

use super::frame::TextFrame;

/// Occurrences of each distinct value, most frequent first.
///
/// Missing cells are skipped. Ties keep first-seen order.
pub fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for row in 0..column.len() {
        let Some(value) = column.cell_text(row) else { continue };
        match positions.get(&value) {
            Some(&pos) => order[pos].1 += 1,
            None => {
                positions.insert(value.clone(), order.len());
                order.push((value, 1));
            }
        }
    }
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}

/// Value counts as a two-column frame (`<column>`, `count`).
pub fn counts_frame(column_name: &str, counts: &[(String, usize)]) -> TextFrame {
    TextFrame::with_row_numbers(
        vec![column_name.to_string(), "count".to_string()],
        counts
            .iter()
            .map(|(value, n)| vec![value.clone(), n.to_string()])
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::definitions::ColumnValues;

    #[test]
    fn counts_sorted_descending_with_stable_ties() {
        let column = Column {
            name: "Cause".into(),
            values: ColumnValues::Categorical(
                ["Stroke", "Malaria", "HIV", "Malaria", "HIV", "Stroke", "Malaria"]
                    .iter()
                    .map(|s| Some(s.to_string()))
                    .chain(std::iter::once(None))
                    .collect(),
            ),
        };
        let counts = value_counts(&column);
        assert_eq!(
            counts,
            vec![
                ("Malaria".to_string(), 3),
                ("Stroke".to_string(), 2),
                ("HIV".to_string(), 2),
            ]
        );
    }

    #[test]
    fn numeric_values_are_counted_by_display_text() {
        let column = Column {
            name: "Year".into(),
            values: ColumnValues::Numeric(vec![Some(2020.0), Some(2019.0), Some(2020.0)]),
        };
        assert_eq!(value_counts(&column)[0], ("2020".to_string(), 2));
    }

    #[test]
    fn frame_has_value_and_count_columns() {
        let frame = counts_frame("Cause", &[("Malaria".into(), 3)]);
        assert_eq!(frame.columns, vec!["Cause", "count"]);
        assert_eq!(frame.rows, vec![vec!["Malaria".to_string(), "3".to_string()]]);
    }
}
