//! Command runners: one connection per run, passed into each stage.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use sqlx::{Connection, PgConnection};
use tracing::info;

use vendor_ingest::{InferOptions, IngestReport, ingest_directory};
use vendor_summary::{enrich, fetch_vendor_summary, write_summary};

use crate::cli::IngestArgs;

/// Result of the `summary` command.
#[derive(Debug, Clone)]
pub struct SummaryOutcome {
    /// Rows returned by the aggregation query.
    pub rows_fetched: usize,
    /// Rows written to the summary table.
    pub rows_written: u64,
    /// Total wall-clock time for the command.
    pub elapsed: Duration,
}

async fn connect(database_url: &str) -> Result<PgConnection> {
    PgConnection::connect(database_url)
        .await
        .context("connect to database")
}

/// Runs the `ingest` command: load every CSV in the data directory.
pub async fn run_ingest(args: &IngestArgs, database_url: &str) -> Result<IngestReport> {
    let mut conn = connect(database_url).await?;

    let options = InferOptions {
        sample_rows: args.sample_rows,
    };
    let result = ingest_directory(&mut conn, &args.data_dir, &options)
        .await
        .context("ingest directory");

    // Close cleanly on both paths so a failed run does not leak the
    // server-side session.
    let close_result = conn.close().await;
    let report = result?;
    close_result.context("close connection")?;

    Ok(report)
}

/// Runs the `summary` command: fetch, enrich, write back.
pub async fn run_summary(database_url: &str) -> Result<SummaryOutcome> {
    let start = Instant::now();
    let mut conn = connect(database_url).await?;

    let outcome = build_summary(&mut conn).await;
    let close_result = conn.close().await;
    let (rows_fetched, rows_written) = outcome?;
    close_result.context("close connection")?;

    Ok(SummaryOutcome {
        rows_fetched,
        rows_written,
        elapsed: start.elapsed(),
    })
}

async fn build_summary(conn: &mut PgConnection) -> Result<(usize, u64)> {
    info!("creating vendor summary");
    let rows = fetch_vendor_summary(conn)
        .await
        .context("fetch vendor summary")?;
    let rows_fetched = rows.len();

    info!(rows = rows_fetched, "cleaning and enriching");
    let enriched = enrich(rows);

    info!("writing vendor_sales_summary");
    let rows_written = write_summary(conn, &enriched)
        .await
        .context("write vendor summary")?;

    Ok((rows_fetched, rows_written))
}
