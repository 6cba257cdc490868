//! Write-back of the enriched summary into PostgreSQL.

use sqlx::PgConnection;
use tracing::info;

use vendor_ingest::{Column, ColumnType, TableSchema, apply_schema, quote_ident};

use crate::enrich::VendorSalesSummary;
use crate::error::{Result, SummaryError};

/// Destination table for the enriched summary.
pub const SUMMARY_TABLE: &str = "vendor_sales_summary";

/// Fixed schema of the summary table.
///
/// Unlike the ingestion tables this schema is not inferred: the
/// aggregation contract fixes every column and type.
pub fn summary_schema() -> TableSchema {
    let columns = [
        ("VendorNumber", ColumnType::BigInt),
        ("VendorName", ColumnType::Text),
        ("Brand", ColumnType::BigInt),
        ("Description", ColumnType::Text),
        ("PurchasePrice", ColumnType::DoublePrecision),
        ("ActualPrice", ColumnType::DoublePrecision),
        ("Volume", ColumnType::DoublePrecision),
        ("TotalPurchaseQuantity", ColumnType::BigInt),
        ("TotalPurchaseDollars", ColumnType::DoublePrecision),
        ("TotalSalesQuantity", ColumnType::DoublePrecision),
        ("TotalSalesDollars", ColumnType::DoublePrecision),
        ("TotalSalesPrice", ColumnType::DoublePrecision),
        ("TotalExciseTax", ColumnType::DoublePrecision),
        ("FreightCost", ColumnType::DoublePrecision),
        ("GrossProfit", ColumnType::DoublePrecision),
        ("ProfitMargin", ColumnType::DoublePrecision),
        ("StockTurnover", ColumnType::DoublePrecision),
        ("SalesToPurchaseRatio", ColumnType::DoublePrecision),
    ];
    TableSchema {
        columns: columns
            .into_iter()
            .map(|(name, ty)| Column {
                name: name.to_string(),
                ty,
            })
            .collect(),
    }
}

/// Serializes the enriched rows as a headerless CSV COPY payload.
///
/// Column order matches [`summary_schema`].
pub fn summary_payload(rows: &[VendorSalesSummary]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record([
                row.vendor_number.to_string(),
                row.vendor_name.clone(),
                row.brand.to_string(),
                row.description.clone(),
                row.purchase_price.to_string(),
                row.actual_price.to_string(),
                row.volume.to_string(),
                row.total_purchase_quantity.to_string(),
                row.total_purchase_dollars.to_string(),
                row.total_sales_quantity.to_string(),
                row.total_sales_dollars.to_string(),
                row.total_sales_price.to_string(),
                row.total_excise_tax.to_string(),
                row.freight_cost.to_string(),
                row.gross_profit.to_string(),
                row.profit_margin.to_string(),
                row.stock_turnover.to_string(),
                row.sales_to_purchase_ratio.to_string(),
            ])
            .map_err(|e| SummaryError::Payload {
                message: e.to_string(),
            })?;
    }

    writer.into_inner().map_err(|e| SummaryError::Payload {
        message: e.to_string(),
    })
}

/// Drops, recreates, and repopulates the summary table.
pub async fn write_summary(conn: &mut PgConnection, rows: &[VendorSalesSummary]) -> Result<u64> {
    apply_schema(conn, SUMMARY_TABLE, &summary_schema()).await?;

    let payload = summary_payload(rows)?;
    let statement = format!(
        "COPY {} FROM STDIN WITH (FORMAT CSV)",
        quote_ident(SUMMARY_TABLE)
    );
    let mut copy = conn.copy_in_raw(&statement).await?;
    copy.send(payload.as_slice()).await?;
    let written = copy.finish().await?;

    info!(table = SUMMARY_TABLE, rows = written, "summary written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> VendorSalesSummary {
        VendorSalesSummary {
            vendor_number: 2,
            vendor_name: "IRA GOLDMAN AND WILLIAMS".to_string(),
            brand: 90085,
            description: "Ch Lilian Ladouys St Estephe".to_string(),
            purchase_price: 23.86,
            actual_price: 36.99,
            volume: 750.0,
            total_purchase_quantity: 9,
            total_purchase_dollars: 214.74,
            total_sales_quantity: 7.0,
            total_sales_dollars: 258.93,
            total_sales_price: 258.93,
            total_excise_tax: 1.15,
            freight_cost: 257.04,
            gross_profit: 44.19,
            profit_margin: 17.066,
            stock_turnover: 0.7777,
            sales_to_purchase_ratio: 1.2057,
        }
    }

    #[test]
    fn schema_column_count_matches_payload_fields() {
        let payload = summary_payload(&[sample_row()]).unwrap();
        let line = String::from_utf8(payload).unwrap();
        let fields = line.trim_end().split(',').count();
        assert_eq!(fields, summary_schema().columns.len());
    }

    #[test]
    fn payload_has_no_header_and_preserves_order() {
        let payload = summary_payload(&[sample_row()]).unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert!(text.starts_with("2,IRA GOLDMAN AND WILLIAMS,90085,"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn empty_rows_make_empty_payload() {
        let payload = summary_payload(&[]).unwrap();
        assert!(payload.is_empty());
    }
}
