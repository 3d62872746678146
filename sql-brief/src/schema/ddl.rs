//! `CREATE TABLE` rendering from table metadata.
//!
//! The output follows the layout SQLite stores for tables created from a data
//! frame: a header line, one line per column and a closing parenthesis. It
//! therefore always satisfies the [`SchemaAnnotator`](super::SchemaAnnotator)
//! line contract.

use arrow::datatypes::DataType;

use crate::table::Table;

/// SQL type name with SQLite affinity for an Arrow storage type.
pub fn sql_type_name(data_type: &DataType) -> &'static str {
    match data_type {
        DataType::Boolean => "BOOLEAN",
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => "INTEGER",
        DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => "REAL",
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => "TIMESTAMP",
        DataType::Binary | DataType::LargeBinary | DataType::FixedSizeBinary(_) => "BLOB",
        _ => "TEXT",
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Renders the `CREATE TABLE` statement of `table`.
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Float64Array, StringArray};
/// use sql_brief::schema::render_create_table;
/// use sql_brief::table::Table;
///
/// let table = Table::from_columns(
///     "prices",
///     vec![
///         ("item", Arc::new(StringArray::from(vec!["tea"])) as ArrayRef),
///         ("cost", Arc::new(Float64Array::from(vec![2.5])) as ArrayRef),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(
///     render_create_table(&table),
///     "CREATE TABLE \"prices\" (\n\"item\" TEXT,\n  \"cost\" REAL\n)"
/// );
/// ```
pub fn render_create_table(table: &Table) -> String {
    let last = table.num_columns().saturating_sub(1);
    let mut out = format!("CREATE TABLE {} (", quote_identifier(table.name()));
    for column in table.columns() {
        out.push('\n');
        if column.index() > 0 {
            out.push_str("  ");
        }
        out.push_str(&quote_identifier(column.name()));
        out.push(' ');
        out.push_str(sql_type_name(column.data_type()));
        if column.index() < last {
            out.push(',');
        }
    }
    out.push_str("\n)");
    out
}
