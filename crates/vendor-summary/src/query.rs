//! The vendor summary aggregation query.

use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};
use tracing::info;

use crate::error::Result;

/// Joins purchases, sales, and freight into one row per vendor/brand.
///
/// Aggregates are cast to concrete wire types (`SUM` over `BIGINT`
/// yields `NUMERIC`, which has no direct `f64`/`i64` decoding), and
/// `Volume` is cast because source files may carry it as text.
pub const VENDOR_SUMMARY_QUERY: &str = r#"
WITH FreightSummary AS (
    SELECT
        "VendorNumber",
        SUM("Freight")::double precision AS "FreightCost"
    FROM vendor_invoice
    GROUP BY "VendorNumber"
),

PurchaseSummary AS (
    SELECT
        p."VendorNumber",
        p."VendorName",
        p."Brand",
        p."Description",
        p."PurchasePrice"::double precision AS "PurchasePrice",
        pp."Price"::double precision AS "ActualPrice",
        pp."Volume"::double precision AS "Volume",
        SUM(p."Quantity")::bigint AS "TotalPurchaseQuantity",
        SUM(p."Dollars")::double precision AS "TotalPurchaseDollars"
    FROM purchases p
    JOIN purchase_prices pp
        ON p."Brand" = pp."Brand"
    WHERE p."PurchasePrice" > 0
    GROUP BY
        p."VendorNumber",
        p."VendorName",
        p."Brand",
        p."Description",
        p."PurchasePrice",
        pp."Price",
        pp."Volume"
),

SalesSummary AS (
    SELECT
        "VendorNo",
        "Brand",
        SUM("SalesQuantity")::double precision AS "TotalSalesQuantity",
        SUM("SalesDollars")::double precision AS "TotalSalesDollars",
        SUM("SalesPrice")::double precision AS "TotalSalesPrice",
        SUM("ExciseTax")::double precision AS "TotalExciseTax"
    FROM sales
    GROUP BY "VendorNo", "Brand"
)

SELECT
    ps."VendorNumber",
    ps."VendorName",
    ps."Brand",
    ps."Description",
    ps."PurchasePrice",
    ps."ActualPrice",
    ps."Volume",
    ps."TotalPurchaseQuantity",
    ps."TotalPurchaseDollars",
    ss."TotalSalesQuantity",
    ss."TotalSalesDollars",
    ss."TotalSalesPrice",
    ss."TotalExciseTax",
    fs."FreightCost"
FROM PurchaseSummary ps
LEFT JOIN SalesSummary ss
    ON ps."VendorNumber" = ss."VendorNo"
    AND ps."Brand" = ss."Brand"
LEFT JOIN FreightSummary fs
    ON ps."VendorNumber" = fs."VendorNumber"
ORDER BY ps."TotalPurchaseDollars" DESC
"#;

/// One row of the aggregation result.
///
/// Missing joined values (a vendor/brand with purchases but no sales,
/// or no freight) have already collapsed to the per-column defaults:
/// zero for numeric columns, empty string for text.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorSummaryRow {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: i64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: f64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
}

impl VendorSummaryRow {
    fn from_row(row: &PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            vendor_number: row.try_get::<Option<i64>, _>("VendorNumber")?.unwrap_or(0),
            vendor_name: row
                .try_get::<Option<String>, _>("VendorName")?
                .unwrap_or_default(),
            brand: row.try_get::<Option<i64>, _>("Brand")?.unwrap_or(0),
            description: row
                .try_get::<Option<String>, _>("Description")?
                .unwrap_or_default(),
            purchase_price: row
                .try_get::<Option<f64>, _>("PurchasePrice")?
                .unwrap_or(0.0),
            actual_price: row.try_get::<Option<f64>, _>("ActualPrice")?.unwrap_or(0.0),
            volume: row.try_get::<Option<f64>, _>("Volume")?.unwrap_or(0.0),
            total_purchase_quantity: row
                .try_get::<Option<i64>, _>("TotalPurchaseQuantity")?
                .unwrap_or(0),
            total_purchase_dollars: row
                .try_get::<Option<f64>, _>("TotalPurchaseDollars")?
                .unwrap_or(0.0),
            total_sales_quantity: row
                .try_get::<Option<f64>, _>("TotalSalesQuantity")?
                .unwrap_or(0.0),
            total_sales_dollars: row
                .try_get::<Option<f64>, _>("TotalSalesDollars")?
                .unwrap_or(0.0),
            total_sales_price: row
                .try_get::<Option<f64>, _>("TotalSalesPrice")?
                .unwrap_or(0.0),
            total_excise_tax: row
                .try_get::<Option<f64>, _>("TotalExciseTax")?
                .unwrap_or(0.0),
            freight_cost: row.try_get::<Option<f64>, _>("FreightCost")?.unwrap_or(0.0),
        })
    }
}

/// Runs the aggregation query and decodes every row.
pub async fn fetch_vendor_summary(conn: &mut PgConnection) -> Result<Vec<VendorSummaryRow>> {
    let rows = sqlx::query(VENDOR_SUMMARY_QUERY)
        .fetch_all(&mut *conn)
        .await?;
    info!(rows = rows.len(), "fetched vendor summary");

    let mut summary = Vec::with_capacity(rows.len());
    for row in &rows {
        summary.push(VendorSummaryRow::from_row(row)?);
    }
    Ok(summary)
}
