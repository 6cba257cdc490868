//! DDL generation for destination tables.

use sqlx::{Executor, PgConnection};
use tracing::debug;

use crate::error::Result;
use crate::infer::TableSchema;

/// Quotes an identifier for PostgreSQL, doubling embedded quotes.
///
/// Quoting keeps mixed-case CSV headers (`VendorNumber`) addressable
/// and tolerates spaces or punctuation in column names.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builds the `DROP TABLE IF EXISTS` statement for a table.
pub fn drop_statement(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", quote_ident(table))
}

/// Builds the `CREATE TABLE` statement for a table.
///
/// Columns appear in source-header order with their mapped native
/// types.
pub fn create_statement(table: &str, schema: &TableSchema) -> String {
    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|column| format!("{} {}", quote_ident(&column.name), column.ty.postgres_type()))
        .collect();
    format!(
        "CREATE TABLE {} ({})",
        quote_ident(table),
        columns.join(", ")
    )
}

/// Drops and recreates the destination table.
///
/// Existing contents are unconditionally discarded; the table is left
/// empty with the inferred column layout.
pub async fn apply_schema(
    conn: &mut PgConnection,
    table: &str,
    schema: &TableSchema,
) -> Result<()> {
    let drop = drop_statement(table);
    debug!(table, statement = %drop, "dropping table");
    (&mut *conn).execute(drop.as_str()).await?;

    let create = create_statement(table, schema);
    debug!(table, statement = %create, "creating table");
    (&mut *conn).execute(create.as_str()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::{Column, ColumnType};

    fn schema(columns: &[(&str, ColumnType)]) -> TableSchema {
        TableSchema {
            columns: columns
                .iter()
                .map(|(name, ty)| Column {
                    name: (*name).to_string(),
                    ty: *ty,
                })
                .collect(),
        }
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("sales"), "\"sales\"");
        assert_eq!(quote_ident("VendorNumber"), "\"VendorNumber\"");
        assert_eq!(quote_ident("odd name"), "\"odd name\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_drop_statement() {
        assert_eq!(drop_statement("sales"), "DROP TABLE IF EXISTS \"sales\"");
    }

    #[test]
    fn test_create_statement_preserves_order() {
        let schema = schema(&[("A", ColumnType::BigInt), ("B", ColumnType::Text)]);
        assert_eq!(
            create_statement("t", &schema),
            "CREATE TABLE \"t\" (\"A\" BIGINT, \"B\" TEXT)"
        );
    }

    #[test]
    fn test_create_statement_all_types() {
        let schema = schema(&[
            ("id", ColumnType::BigInt),
            ("amount", ColumnType::DoublePrecision),
            ("active", ColumnType::Boolean),
            ("seen_at", ColumnType::Timestamp),
            ("note", ColumnType::Text),
        ]);
        assert_eq!(
            create_statement("events", &schema),
            "CREATE TABLE \"events\" (\"id\" BIGINT, \"amount\" DOUBLE PRECISION, \
             \"active\" BOOLEAN, \"seen_at\" TIMESTAMP, \"note\" TEXT)"
        );
    }
}
