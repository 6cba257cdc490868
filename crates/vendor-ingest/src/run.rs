//! Directory-level ingestion runs.

use std::path::Path;
use std::time::{Duration, Instant};

use sqlx::PgConnection;
use tracing::{Instrument, info, info_span};

use crate::discovery::{list_csv_files, table_name_for};
use crate::error::Result;
use crate::infer::InferOptions;
use crate::loader::{LoadReport, load_file};

/// Report for one ingestion run over a directory.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Per-file outcomes in load order.
    pub loads: Vec<LoadReport>,
    /// Total wall-clock time across all files.
    pub elapsed: Duration,
}

impl IngestReport {
    /// Total rows copied across all tables.
    pub fn total_rows(&self) -> u64 {
        self.loads.iter().map(|load| load.rows).sum()
    }
}

/// Loads every CSV file in `dir` into its own table, one at a time.
///
/// Files load strictly sequentially on the shared connection. The
/// first failure aborts the run and propagates; files already loaded
/// stay loaded (each table's drop-and-recreate is idempotent, the run
/// as a whole is not).
pub async fn ingest_directory(
    conn: &mut PgConnection,
    dir: &Path,
    options: &InferOptions,
) -> Result<IngestReport> {
    let start = Instant::now();
    let files = list_csv_files(dir)?;
    info!(dir = %dir.display(), files = files.len(), "ingestion started");

    let mut loads = Vec::with_capacity(files.len());
    for path in &files {
        let table = table_name_for(path)?;
        let span = info_span!("load", table = %table);
        let report = load_file(conn, path, &table, options).instrument(span).await?;
        loads.push(report);
    }

    let elapsed = start.elapsed();
    info!(
        files = loads.len(),
        total_rows = loads.iter().map(|l| l.rows).sum::<u64>(),
        elapsed_secs = elapsed.as_secs_f64(),
        "ingestion complete"
    );

    Ok(IngestReport { loads, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_total_rows() {
        let report = IngestReport {
            loads: vec![
                LoadReport {
                    table: "a".to_string(),
                    rows: 2,
                    elapsed: Duration::from_millis(5),
                },
                LoadReport {
                    table: "b".to_string(),
                    rows: 3,
                    elapsed: Duration::from_millis(7),
                },
            ],
            elapsed: Duration::from_millis(12),
        };
        assert_eq!(report.total_rows(), 5);
    }
}
