//! CSV ingestion into PostgreSQL.
//!
//! Loads a directory of header-bearing CSV files into the database,
//! one table per file: a bounded sample of each file drives column
//! type inference, the destination table is dropped and recreated
//! from the inferred schema, and the file bytes stream through the
//! COPY protocol.

pub mod discovery;
pub mod error;
pub mod infer;
pub mod loader;
pub mod run;
pub mod schema;

pub use discovery::{list_csv_files, table_name_for};
pub use error::{IngestError, Result};
pub use infer::{Column, ColumnType, InferOptions, TableSchema, infer_schema};
pub use loader::{LoadReport, copy_statement, load_file};
pub use run::{IngestReport, ingest_directory};
pub use schema::{apply_schema, create_statement, drop_statement, quote_ident};
