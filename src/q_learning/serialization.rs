//! Flat text persistence for Q-tables.
//!
//! The file holds exactly one line per state index (19 683 lines) and nine
//! comma-separated values per line, one per action, in fixed decimal
//! notation with six fractional digits. There is no header.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, WriterBuilder};

use crate::{
    Error, Result,
    q_learning::q_table::QTable,
    tictactoe::{NUM_ACTIONS, NUM_STATES},
};

/// Fractional digits written for every value
pub const DECIMAL_PLACES: usize = 6;

/// Write every row of `table` to `writer`.
pub fn write_table<W: Write>(table: &QTable, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    for row in table.rows() {
        csv_writer.write_record(row.iter().map(|value| format!("{value:.DECIMAL_PLACES$}")))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Replace the contents of `table` with the matrix read from `reader`.
///
/// The whole input is parsed and validated before `table` is touched, so on
/// error the table keeps its previous values. Line numbers in errors are
/// physical lines of the input, blank lines included.
///
/// # Errors
///
/// Returns [`Error::DataFormat`] for a blank line, a wrong line count, a row
/// without exactly nine fields, or a field that is not a finite number.
pub fn read_table<R: Read>(table: &mut QTable, mut reader: R) -> Result<()> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|source| Error::Io {
        operation: "read value table".to_string(),
        source,
    })?;

    // The csv reader skips empty lines, which would shift every later line
    // number, so they are rejected up front.
    if let Some(index) = text.lines().position(|line| line.trim().is_empty()) {
        return Err(Error::DataFormat {
            line: index + 1,
            message: "blank line".to_string(),
        });
    }

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<[f64; NUM_ACTIONS]> = Vec::with_capacity(NUM_STATES);
    for (index, record) in csv_reader.records().enumerate() {
        let line = index + 1;
        let record = record.map_err(|e| Error::DataFormat {
            line,
            message: e.to_string(),
        })?;

        if rows.len() == NUM_STATES {
            return Err(Error::DataFormat {
                line,
                message: format!("expected exactly {NUM_STATES} rows"),
            });
        }
        if record.len() != NUM_ACTIONS {
            return Err(Error::DataFormat {
                line,
                message: format!(
                    "expected {NUM_ACTIONS} comma-separated values, found {}",
                    record.len()
                ),
            });
        }

        let mut row = [0.0; NUM_ACTIONS];
        for (column, field) in record.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| Error::DataFormat {
                line,
                message: format!("column {column}: '{field}' is not a number"),
            })?;
            if !value.is_finite() {
                return Err(Error::DataFormat {
                    line,
                    message: format!("column {column}: '{field}' is not finite"),
                });
            }
            row[column] = value;
        }
        rows.push(row);
    }

    if rows.len() != NUM_STATES {
        return Err(Error::DataFormat {
            line: rows.len() + 1,
            message: format!("expected {NUM_STATES} rows, found {}", rows.len()),
        });
    }

    table.replace_rows(rows);
    Ok(())
}

/// Write `table` to the file at `path`, creating or truncating it.
pub fn save_to_file<P: AsRef<Path>>(table: &QTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| Error::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(table, BufWriter::new(file))
}

/// Load the file at `path` into `table`; see [`read_table`].
pub fn load_from_file<P: AsRef<Path>>(table: &mut QTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(table, BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateIndex;

    fn state(value: usize) -> StateIndex {
        StateIndex::new(value).unwrap()
    }

    fn populated() -> QTable {
        let mut table = QTable::new(0.5, 0.9);
        table.set(state(0), 0, 0.5);
        table.set(state(1), 8, -1.25);
        table.set(state(4_000), 3, 0.123456);
        table.set(state(NUM_STATES - 1), 4, 2.0);
        table
    }

    #[test]
    fn written_shape() {
        let mut buffer = Vec::new();
        write_table(&populated(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), NUM_STATES);
        assert!(lines.iter().all(|l| l.split(',').count() == NUM_ACTIONS));
        assert_eq!(
            lines[0],
            "0.500000,0.000000,0.000000,0.000000,0.000000,0.000000,0.000000,0.000000,0.000000"
        );
        assert!(lines[1].ends_with(",-1.250000"));
    }

    #[test]
    fn round_trip_reproduces_matrix() {
        let original = populated();
        let mut buffer = Vec::new();
        write_table(&original, &mut buffer).unwrap();

        let mut restored = QTable::new(0.5, 0.9);
        read_table(&mut restored, buffer.as_slice()).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn rejects_short_file_without_touching_table() {
        let text = "0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0,0.0\n".repeat(10);
        let mut table = populated();

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 11, .. }));
        assert_eq!(table, populated());
    }

    #[test]
    fn rejects_extra_rows() {
        let text = "1,1,1,1,1,1,1,1,1\n".repeat(NUM_STATES + 1);
        let mut table = QTable::new(0.5, 0.9);

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line, .. } if line == NUM_STATES + 1));
        assert!(table.is_untouched());
    }

    #[test]
    fn rejects_wrong_column_count() {
        let mut text = "0,0,0,0,0,0,0,0,0\n".repeat(NUM_STATES);
        text.insert_str(0, "0,0,0,0,0,0,0,0\n");
        let mut table = QTable::new(0.5, 0.9);

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 1, .. }));
        assert!(err.to_string().contains("found 8"));
    }

    #[test]
    fn rejects_non_numeric_field() {
        let mut lines = vec!["0,0,0,0,0,0,0,0,0"; NUM_STATES];
        lines[2] = "0,0,0,abc,0,0,0,0,0";
        let text = lines.join("\n");
        let mut table = QTable::new(0.5, 0.9);

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 3, .. }));
        assert!(table.is_untouched());
    }

    #[test]
    fn missing_file_is_resource_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = QTable::new(0.5, 0.9);
        let err = load_from_file(&mut table, dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q_values.csv");
        save_to_file(&populated(), &path).unwrap();

        let mut restored = QTable::new(0.5, 0.9);
        load_from_file(&mut restored, &path).unwrap();
        assert_eq!(restored, populated());
    }

    #[test]
    fn rejects_blank_line_between_rows() {
        let mut lines = vec!["0,0,0,0,0,0,0,0,0"; NUM_STATES];
        lines.insert(5, "");
        let text = lines.join("\n");
        let mut table = populated();

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line: 6, .. }), "{err}");
        assert_eq!(table, populated());
    }

    #[test]
    fn rejects_trailing_blank_lines() {
        let mut text = "0,0,0,0,0,0,0,0,0\n".repeat(NUM_STATES);
        text.push_str("\n\n");
        let mut table = QTable::new(0.5, 0.9);

        let err = read_table(&mut table, text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::DataFormat { line, .. } if line == NUM_STATES + 1));
        assert!(table.is_untouched());
    }
}
