//! Access to the csv input directory.
//!
//! Input tables are positional: each extractor knows which column indexes it
//! needs per file name. The header row is always skipped.

use std::fs::File;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::error::{Error, Result};

/// Open a named csv table from the input directory.
pub fn open_table(dir: &Path, table: &'static str) -> Result<Reader<File>> {
    let path = dir.join(table);
    if !path.is_file() {
        return Err(Error::MissingInput { table });
    }

    Ok(ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?)
}

/// Positional field access; a short row is a malformed row.
pub fn field<'r>(
    table: &'static str,
    row: &'r StringRecord,
    index: usize,
) -> Result<&'r str> {
    row.get(index).ok_or_else(|| Error::Parse {
        table,
        value: format!("<missing column {}>", index),
    })
}

/// Parse a positional field as an integer key or count.
pub fn int_field(table: &'static str, row: &StringRecord, index: usize) -> Result<i64> {
    let raw = field(table, row, index)?;
    raw.trim().parse().map_err(|_| Error::Parse {
        table,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_is_named() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_table(dir.path(), "versions.csv").unwrap_err();
        match err {
            Error::MissingInput { table } => assert_eq!(table, "versions.csv"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_header_row_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("t.csv"), "id,name\n1,normal\n").unwrap();

        let mut reader = open_table(dir.path(), "t.csv").unwrap();
        let rows: Vec<StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(int_field("t.csv", &rows[0], 0).unwrap(), 1);
    }

    #[test]
    fn test_parse_error_reports_raw_value() {
        let row = StringRecord::from(vec!["abc"]);
        let err = int_field("moves.csv", &row, 0).unwrap_err();
        match err {
            Error::Parse { table, value } => {
                assert_eq!(table, "moves.csv");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
