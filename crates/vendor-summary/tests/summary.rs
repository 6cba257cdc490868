//! Tests covering the summary stage seams that run without a database:
//! enrichment arithmetic and the write-back payload.

use vendor_summary::{VendorSummaryRow, enrich, summary_payload, summary_schema};

fn unsold_row() -> VendorSummaryRow {
    // A vendor/brand with purchases but no matching sales or freight:
    // the LEFT JOIN columns have already collapsed to zero defaults.
    VendorSummaryRow {
        vendor_number: 105,
        vendor_name: "ALTAMAR BRANDS LLC".to_string(),
        brand: 8412,
        description: "Tequila Ocho Plata".to_string(),
        purchase_price: 35.71,
        actual_price: 49.99,
        volume: 750.0,
        total_purchase_quantity: 6,
        total_purchase_dollars: 100.0,
        total_sales_quantity: 0.0,
        total_sales_dollars: 0.0,
        total_sales_price: 0.0,
        total_excise_tax: 0.0,
        freight_cost: 0.0,
    }
}

#[test]
fn unsold_inventory_enriches_with_guarded_ratios() {
    let enriched = enrich(vec![unsold_row()]);
    assert_eq!(enriched.len(), 1);

    let row = &enriched[0];
    assert_eq!(row.gross_profit, -100.0);
    assert_eq!(row.profit_margin, 0.0);
    assert_eq!(row.stock_turnover, 0.0);
    assert_eq!(row.sales_to_purchase_ratio, 0.0);
}

#[test]
fn payload_rows_line_up_with_the_summary_schema() {
    let enriched = enrich(vec![unsold_row()]);
    let payload = summary_payload(&enriched).expect("payload");
    let text = String::from_utf8(payload).expect("utf8");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].split(',').count(),
        summary_schema().columns.len()
    );
    // Derived columns sit at the tail in schema order.
    assert!(lines[0].ends_with("-100,0,0,0"));
}
