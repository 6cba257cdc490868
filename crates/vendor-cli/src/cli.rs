//! CLI argument definitions for the vendor ETL.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vendor-etl",
    version,
    about = "Vendor inventory ETL - bulk-load CSV files into PostgreSQL and build the vendor sales summary",
    long_about = "Bulk-load a directory of CSV files into PostgreSQL, one table per file,\n\
                  with schema inference from sampled rows, then aggregate purchases,\n\
                  sales, and freight into the vendor_sales_summary table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// PostgreSQL connection URL (falls back to the DATABASE_URL
    /// environment variable).
    #[arg(long = "database-url", value_name = "URL", global = true)]
    pub database_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Bulk-load every CSV file in a directory, one table per file.
    Ingest(IngestArgs),

    /// Build and persist the vendor sales summary from loaded tables.
    Summary,
}

#[derive(Parser)]
pub struct IngestArgs {
    /// Directory containing the source CSV files.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Number of rows sampled per file for type inference.
    ///
    /// Rows beyond the sample that do not match the inferred types
    /// fail the file's COPY instead of widening the column.
    #[arg(long = "sample-rows", value_name = "N", default_value_t = 1000)]
    pub sample_rows: usize,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
