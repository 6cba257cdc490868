//! Cleaning and derived-column arithmetic for the vendor summary.

use crate::query::VendorSummaryRow;

/// A vendor summary row with derived performance columns.
#[derive(Debug, Clone, PartialEq)]
pub struct VendorSalesSummary {
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
    pub gross_profit: f64,
    pub profit_margin: f64,
    pub stock_turnover: f64,
    pub sales_to_purchase_ratio: f64,
}

/// Divides with a zero-denominator guard.
///
/// A zero denominator yields 0.0, consistent with the zero-fill
/// default for missing joined values: a vendor with no sales has a
/// zero margin, not an undefined one.
fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Cleans one aggregation row and computes its derived columns.
pub fn enrich_row(row: VendorSummaryRow) -> VendorSalesSummary {
    let gross_profit = row.total_sales_dollars - row.total_purchase_dollars;
    let profit_margin = safe_ratio(gross_profit, row.total_sales_dollars) * 100.0;
    let stock_turnover = safe_ratio(row.total_sales_quantity, row.total_purchase_quantity as f64);
    let sales_to_purchase_ratio = safe_ratio(row.total_sales_dollars, row.total_purchase_dollars);

    VendorSalesSummary {
        vendor_number: row.vendor_number,
        vendor_name: row.vendor_name.trim().to_string(),
        brand: row.brand,
        description: row.description.trim().to_string(),
        purchase_price: row.purchase_price,
        actual_price: row.actual_price,
        volume: row.volume,
        total_purchase_quantity: row.total_purchase_quantity,
        total_purchase_dollars: row.total_purchase_dollars,
        total_sales_quantity: row.total_sales_quantity,
        total_sales_dollars: row.total_sales_dollars,
        total_sales_price: row.total_sales_price,
        total_excise_tax: row.total_excise_tax,
        freight_cost: row.freight_cost,
        gross_profit,
        profit_margin,
        stock_turnover,
        sales_to_purchase_ratio,
    }
}

/// Enriches every row of the aggregation result, preserving order.
pub fn enrich(rows: Vec<VendorSummaryRow>) -> Vec<VendorSalesSummary> {
    rows.into_iter().map(enrich_row).collect()
}
