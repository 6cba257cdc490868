//! Sampled column type inference.
//!
//! Types are inferred from a bounded prefix of each file rather than a
//! full scan. Rows beyond the sample that do not conform to the
//! inferred type surface later as a COPY failure for that file; the
//! load is never silently corrected.

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// Storage type assigned to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    BigInt,
    DoublePrecision,
    Boolean,
    Timestamp,
    Text,
}

impl ColumnType {
    /// PostgreSQL native type name used in generated DDL.
    pub fn postgres_type(self) -> &'static str {
        match self {
            ColumnType::BigInt => "BIGINT",
            ColumnType::DoublePrecision => "DOUBLE PRECISION",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Text => "TEXT",
        }
    }
}

/// A named column with its inferred storage type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Ordered column schema for one source file.
///
/// Column order follows the source header and is preserved through DDL
/// generation and the COPY stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<Column>,
}

/// Options controlling schema inference.
#[derive(Debug, Clone, Copy)]
pub struct InferOptions {
    /// Maximum number of data rows sampled per file.
    pub sample_rows: usize,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self { sample_rows: 1000 }
    }
}

/// Per-column candidate set, narrowed as sampled values are observed.
#[derive(Debug, Clone, Copy)]
struct Candidates {
    integer: bool,
    float: bool,
    boolean: bool,
    timestamp: bool,
    non_empty: usize,
}

impl Candidates {
    fn new() -> Self {
        Self {
            integer: true,
            float: true,
            boolean: true,
            timestamp: true,
            non_empty: 0,
        }
    }

    /// Narrows the candidate set with one sampled value.
    ///
    /// Empty values carry no type information and leave the set
    /// untouched.
    fn observe(&mut self, value: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return;
        }
        self.non_empty += 1;
        self.integer = self.integer && trimmed.parse::<i64>().is_ok();
        self.float = self.float && trimmed.parse::<f64>().is_ok();
        self.boolean = self.boolean && is_boolean_literal(trimmed);
        self.timestamp = self.timestamp && is_timestamp_literal(trimmed);
    }

    /// Resolves the surviving candidates to a storage type.
    ///
    /// Priority: integer, float, boolean, timestamp, then text. A
    /// column with no non-empty sampled values falls back to text.
    fn resolve(self) -> ColumnType {
        if self.non_empty == 0 {
            return ColumnType::Text;
        }
        if self.integer {
            ColumnType::BigInt
        } else if self.float {
            ColumnType::DoublePrecision
        } else if self.boolean {
            ColumnType::Boolean
        } else if self.timestamp {
            ColumnType::Timestamp
        } else {
            ColumnType::Text
        }
    }
}

/// Literals the PostgreSQL boolean input routine accepts in CSV COPY.
fn is_boolean_literal(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "t" | "f" | "yes" | "no" | "y" | "n" | "on" | "off" | "1" | "0"
    )
}

/// Date and date-time literal shapes accepted for the timestamp type.
fn is_timestamp_literal(value: &str) -> bool {
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
        return true;
    }
    if DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
    {
        return true;
    }
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// Infers a column schema from the first `sample_rows` records of a
/// CSV file.
pub fn infer_schema(path: &Path, options: &InferOptions) -> Result<TableSchema> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| map_csv_error(path, e))?
        .clone();
    if headers.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut candidates = vec![Candidates::new(); headers.len()];

    for record in reader.records().take(options.sample_rows) {
        let record = record.map_err(|e| map_csv_error(path, e))?;
        for (idx, candidate) in candidates.iter_mut().enumerate() {
            candidate.observe(record.get(idx).unwrap_or(""));
        }
    }

    let columns = headers
        .iter()
        .zip(candidates)
        .map(|(name, candidate)| Column {
            name: name.trim().trim_matches('\u{feff}').to_string(),
            ty: candidate.resolve(),
        })
        .collect();

    Ok(TableSchema { columns })
}

fn map_csv_error(path: &Path, error: csv::Error) -> IngestError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn infer(contents: &str) -> TableSchema {
        let file = write_csv(contents);
        infer_schema(file.path(), &InferOptions::default()).unwrap()
    }

    fn types(schema: &TableSchema) -> Vec<ColumnType> {
        schema.columns.iter().map(|c| c.ty).collect()
    }

    #[test]
    fn infers_sales_scenario() {
        let schema = infer("id,amount,date\n1,10.5,2024-01-01\n2,20.0,2024-01-02\n");
        assert_eq!(
            types(&schema),
            vec![
                ColumnType::BigInt,
                ColumnType::DoublePrecision,
                ColumnType::Timestamp
            ]
        );
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "amount", "date"]);
    }

    #[test]
    fn single_non_numeric_value_degrades_integer() {
        let schema = infer("a\n1\n2\nx\n");
        assert_eq!(types(&schema), vec![ColumnType::Text]);
    }

    #[test]
    fn integer_degrades_to_float_not_text() {
        let schema = infer("a\n1\n2.5\n3\n");
        assert_eq!(types(&schema), vec![ColumnType::DoublePrecision]);
    }

    #[test]
    fn boolean_literals() {
        let schema = infer("flag\ntrue\nFalse\nt\nno\n");
        assert_eq!(types(&schema), vec![ColumnType::Boolean]);
    }

    #[test]
    fn timestamp_literal_shapes() {
        assert!(is_timestamp_literal("2024-01-01"));
        assert!(is_timestamp_literal("2024-01-01 10:30:00"));
        assert!(is_timestamp_literal("2024-01-01 10:30:00.250"));
        assert!(is_timestamp_literal("2024-01-01T10:30:00"));
        assert!(is_timestamp_literal("2024-01-01T10:30:00.250"));
        assert!(is_timestamp_literal("2024-01-01T10:30:00Z"));
        assert!(is_timestamp_literal("2024-01-01T10:30:00+02:00"));
        // Near misses fall through to text.
        assert!(!is_timestamp_literal("2024-13-01"));
        assert!(!is_timestamp_literal("01/02/2024"));
        assert!(!is_timestamp_literal("2024-01-01 10:30"));
    }

    #[test]
    fn mixed_timestamp_shapes_infer_timestamp() {
        let schema = infer("seen\n2024-01-01\n2024-01-02T08:00:00\n2024-01-03 09:15:30.5\n");
        assert_eq!(types(&schema), vec![ColumnType::Timestamp]);
    }

    #[test]
    fn empty_values_do_not_force_text() {
        let schema = infer("a,b\n1,,\n,2024-05-01 10:00:00\n3,\n");
        assert_eq!(
            types(&schema),
            vec![ColumnType::BigInt, ColumnType::Timestamp]
        );
    }

    #[test]
    fn all_empty_column_is_text() {
        let schema = infer("a,b\n1,\n2,\n");
        assert_eq!(types(&schema), vec![ColumnType::BigInt, ColumnType::Text]);
    }

    #[test]
    fn sample_bound_is_respected() {
        // The offending value sits outside the sample, so inference
        // still says integer.
        let mut contents = String::from("a\n");
        for i in 0..5 {
            contents.push_str(&format!("{i}\n"));
        }
        contents.push_str("oops\n");
        let file = write_csv(&contents);
        let schema = infer_schema(file.path(), &InferOptions { sample_rows: 5 }).unwrap();
        assert_eq!(types(&schema), vec![ColumnType::BigInt]);
    }

    #[test]
    fn short_rows_are_treated_as_missing() {
        let schema = infer("a,b\n1,x\n2\n");
        assert_eq!(types(&schema), vec![ColumnType::BigInt, ColumnType::Text]);
    }

    #[test]
    fn postgres_type_names() {
        assert_eq!(ColumnType::BigInt.postgres_type(), "BIGINT");
        assert_eq!(ColumnType::DoublePrecision.postgres_type(), "DOUBLE PRECISION");
        assert_eq!(ColumnType::Boolean.postgres_type(), "BOOLEAN");
        assert_eq!(ColumnType::Timestamp.postgres_type(), "TIMESTAMP");
        assert_eq!(ColumnType::Text.postgres_type(), "TEXT");
    }
}
