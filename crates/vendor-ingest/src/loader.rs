//! Bulk loading of CSV files through the PostgreSQL COPY protocol.

use std::path::Path;
use std::time::{Duration, Instant};

use sqlx::PgConnection;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::infer::{InferOptions, infer_schema};
use crate::schema::{apply_schema, quote_ident};

const COPY_CHUNK_BYTES: usize = 64 * 1024;

/// Outcome of loading one file into one table.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Destination table name.
    pub table: String,
    /// Rows copied into the table.
    pub rows: u64,
    /// Wall-clock time for the whole load (inference, DDL, COPY).
    pub elapsed: Duration,
}

/// Builds the COPY statement for a table.
///
/// `HEADER TRUE` makes the protocol consume and discard the header
/// line itself; the file bytes are streamed as-is, never re-parsed.
pub fn copy_statement(table: &str) -> String {
    format!(
        "COPY {} FROM STDIN WITH (FORMAT CSV, HEADER TRUE)",
        quote_ident(table)
    )
}

/// Loads one CSV file into a freshly recreated table.
///
/// The destination table is dropped and recreated from the inferred
/// schema, so prior contents are always discarded. The COPY stream is
/// transactional on the server side: a rejected row leaves the table
/// empty and surfaces here as an error, never as a partial load.
pub async fn load_file(
    conn: &mut PgConnection,
    path: &Path,
    table: &str,
    options: &InferOptions,
) -> Result<LoadReport> {
    let start = Instant::now();
    info!(table, path = %path.display(), "starting load");

    let schema = infer_schema(path, options)?;
    debug!(table, columns = schema.columns.len(), "inferred schema");
    apply_schema(conn, table, &schema).await?;

    let rows = copy_file(conn, path, table).await?;

    let elapsed = start.elapsed();
    info!(
        table,
        rows,
        elapsed_secs = elapsed.as_secs_f64(),
        "completed COPY"
    );

    Ok(LoadReport {
        table: table.to_string(),
        rows,
        elapsed,
    })
}

/// Streams the raw bytes of `path` into `table` via COPY.
async fn copy_file(conn: &mut PgConnection, path: &Path, table: &str) -> Result<u64> {
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut copy = conn.copy_in_raw(&copy_statement(table)).await?;

    let mut buf = vec![0u8; COPY_CHUNK_BYTES];
    loop {
        let read = match file.read(&mut buf).await {
            Ok(read) => read,
            Err(source) => {
                // Tell the server the stream is dead so the connection
                // stays usable for subsequent statements.
                let abort_result = copy.abort("source file read failed").await;
                return Err(copy_read_error(path, table, source, abort_result));
            }
        };
        if read == 0 {
            break;
        }
        copy.send(&buf[..read]).await?;
    }

    Ok(copy.finish().await?)
}

/// Maps a mid-COPY source read failure to its error.
///
/// The read error is the root cause and always wins; a failure of the
/// abort itself is only logged.
fn copy_read_error(
    path: &Path,
    table: &str,
    source: std::io::Error,
    abort_result: std::result::Result<(), sqlx::Error>,
) -> IngestError {
    if let Err(abort_error) = abort_result {
        warn!(table, error = %abort_error, "failed to abort COPY stream");
    }
    IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    }
}
