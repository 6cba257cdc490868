//! Vendor sales summary: aggregation, enrichment, and write-back.
//!
//! Joins the ingested purchases, sales, and freight tables into one
//! row per vendor/brand, computes performance ratios, and persists
//! the result as the `vendor_sales_summary` table.

pub mod enrich;
pub mod error;
pub mod query;
pub mod write;

pub use enrich::{VendorSalesSummary, enrich, enrich_row};
pub use error::{Result, SummaryError};
pub use query::{VENDOR_SUMMARY_QUERY, VendorSummaryRow, fetch_vendor_summary};
pub use write::{SUMMARY_TABLE, summary_payload, summary_schema, write_summary};
