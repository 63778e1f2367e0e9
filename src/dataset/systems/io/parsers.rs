// src/dataset/systems/io/parsers.rs
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use bevy::log::debug;

use crate::dataset::definitions::{Column, ColumnValues, DataTable};
use crate::dataset::error::{DataLoadError, DataResult};

/// Reads and parses a CSV file from disk.
pub fn read_csv_table(path: &Path) -> DataResult<DataTable> {
    let file = fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_csv(file)?;
    debug!(
        "Parsed '{}': {} rows x {} columns",
        path.display(),
        table.row_count,
        table.columns.len()
    );
    Ok(table)
}

/// Parses CSV text with a header row and infers each column's kind.
///
/// A column is numeric when every non-empty cell parses as a float and at
/// least one cell is non-empty. Empty cells become missing values.
pub fn parse_csv<R: Read>(reader: R) -> DataResult<DataTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { h.trim_start_matches('\u{FEFF}') } else { h };
            h.trim().to_string()
        })
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(DataLoadError::MissingHeader);
    }
    let headers = dedupe_headers(headers);

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(DataLoadError::TooManyFields {
                // 1-based, counting the header line
                line: i + 2,
                found: record.len(),
                expected: headers.len(),
            });
        }
        for (col, cells) in raw.iter_mut().enumerate() {
            let trimmed = record.get(col).map(str::trim).unwrap_or_default();
            cells.push(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            });
        }
    }

    let row_count = raw.first().map_or(0, Vec::len);
    let columns = headers
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| Column {
            name,
            values: infer_values(cells),
        })
        .collect();

    Ok(DataTable { columns, row_count })
}

/// Repeated names get a `.1`, `.2`, ... suffix, skipping names already taken.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut taken: HashSet<String> = headers.iter().cloned().collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(headers.len());
    for name in headers {
        if seen.insert(name.clone()) {
            out.push(name);
            continue;
        }
        let mut n = 1;
        let renamed = loop {
            let candidate = format!("{}.{}", name, n);
            if !taken.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        debug!("Renamed duplicate column '{}' to '{}'", name, renamed);
        taken.insert(renamed.clone());
        seen.insert(renamed.clone());
        out.push(renamed);
    }
    out
}

fn infer_values(cells: Vec<Option<String>>) -> ColumnValues {
    let any_present = cells.iter().any(Option::is_some);
    let parsed: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            None => Some(None),
            Some(text) => parse_number(text).map(Some),
        })
        .collect();
    match parsed {
        Some(numbers) if any_present => ColumnValues::Numeric(numbers),
        _ => ColumnValues::Categorical(cells),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    // "NaN"/"inf" spelled out are labels, not measurements
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::definitions::ColumnKind;
    use std::io::Write;

    const SAMPLE: &str = "\u{FEFF}Country,Year,Cause,Number_of_Deaths\n\
        India,2019,Malaria,120\n\
        Chile,2020, Stroke ,\n\
        India,2020,Malaria,80.5\n";

    #[test]
    fn infers_column_kinds() {
        let table = parse_csv(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.row_count, 3);
        assert_eq!(table.column_names(), vec!["Country", "Year", "Cause", "Number_of_Deaths"]);
        assert_eq!(table.column("Country").unwrap().kind(), ColumnKind::Categorical);
        assert_eq!(table.column("Year").unwrap().kind(), ColumnKind::Numeric);
        let deaths = table.column("Number_of_Deaths").unwrap();
        assert_eq!(deaths.numeric().unwrap(), &[Some(120.0), None, Some(80.5)]);
        assert_eq!(
            table.column("Cause").unwrap().categorical().unwrap()[1].as_deref(),
            Some("Stroke")
        );
    }

    #[test]
    fn mixed_column_stays_categorical() {
        let table = parse_csv("Code\n12\nA7\n".as_bytes()).unwrap();
        assert_eq!(table.column("Code").unwrap().kind(), ColumnKind::Categorical);
    }

    #[test]
    fn all_empty_column_is_categorical() {
        let table = parse_csv("A,B\n1,\n2,\n".as_bytes()).unwrap();
        assert_eq!(table.column("B").unwrap().kind(), ColumnKind::Categorical);
        assert_eq!(table.column("A").unwrap().kind(), ColumnKind::Numeric);
    }

    #[test]
    fn short_rows_are_padded_with_missing_values() {
        let table = parse_csv("A,B,C\n1,x,2\n3\n".as_bytes()).unwrap();
        assert_eq!(table.row_count, 2);
        assert_eq!(table.column("A").unwrap().numeric().unwrap(), &[Some(1.0), Some(3.0)]);
        assert_eq!(
            table.column("B").unwrap().categorical().unwrap(),
            &[Some("x".to_string()), None]
        );
        assert_eq!(table.column("C").unwrap().numeric().unwrap(), &[Some(2.0), None]);
    }

    #[test]
    fn extra_fields_are_rejected_with_line_number() {
        let err = parse_csv("A,B\n1,2\n3,4,5\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::TooManyFields { line: 3, found: 3, expected: 2 }
        ));
    }

    #[test]
    fn duplicate_headers_get_numbered_suffixes() {
        let table = parse_csv("A,A,A.1,A\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.column_names(), vec!["A", "A.2", "A.1", "A.3"]);
        assert_eq!(table.column("A.2").unwrap().numeric().unwrap(), &[Some(2.0)]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(parse_csv("".as_bytes()), Err(DataLoadError::MissingHeader)));
    }

    #[test]
    fn reads_from_disk_and_reports_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.columns.len(), 4);

        let missing = file.path().with_extension("missing");
        assert!(matches!(read_csv_table(&missing), Err(DataLoadError::Io { .. })));
    }
}
