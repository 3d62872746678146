//! Integration tests for schema annotation.
//!
//! Covers hand-written `CREATE TABLE` text, text rendered from loaded tables,
//! and catalogs of several tables.

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use sql_brief::prelude::*;

const SHOP_DDL: &str = "CREATE TABLE \"shop\" (\n\
\"sku\" TEXT,\n  \
\"price\" REAL,\n  \
\"stock\" INTEGER\n\
)";

fn shop(extra_column: bool) -> Table {
    let mut columns = vec![
        (
            "sku",
            Arc::new(StringArray::from(vec![
                Some("a-1"),
                None,
                Some("b-2"),
                Some("a-1"),
                Some("c-3"),
            ])) as ArrayRef,
        ),
        (
            "price",
            Arc::new(Float64Array::from(vec![9.5, 3.0, 9.5, 12.25, 1.0])) as ArrayRef,
        ),
        (
            "stock",
            Arc::new(Int64Array::from(vec![4, 0, 4, 7, 2])) as ArrayRef,
        ),
    ];
    if extra_column {
        columns.push((
            "restocked",
            Arc::new(Date32Array::from(vec![19000, 19001, 19002, 19003, 19004])) as ArrayRef,
        ));
    }
    Table::from_columns("shop", columns).unwrap()
}

#[test]
fn test_annotates_each_column_line() {
    let annotated = annotate_schema(SHOP_DDL, &shop(false), true).unwrap();

    assert_eq!(
        annotated,
        "CREATE TABLE \"shop\" (\n\
         \"sku\" TEXT, -- Sample values like: [a-1, b-2, c-3]\n  \
         \"price\" REAL, -- Sample values like: [9.5, 3.0, 12.25, 1.0]\n  \
         \"stock\" INTEGER -- Sample values like: [4, 0, 7, 2]\n\
         )"
    );
}

#[test]
fn test_column_count_mismatch_is_rejected() {
    let err = annotate_schema(SHOP_DDL, &shop(true), true).unwrap_err();
    match err {
        BriefError::InputShape {
            table,
            lines,
            columns,
        } => {
            assert_eq!(table, "shop");
            assert_eq!(lines, 3);
            assert_eq!(columns, 4);
        }
        other => panic!("expected InputShape, got {other:?}"),
    }

    // Without samples the text is passed through untouched.
    assert_eq!(annotate_schema(SHOP_DDL, &shop(true), false).unwrap(), SHOP_DDL);
}

#[test]
fn test_max_unique_limits_listed_values() {
    let annotated = SchemaAnnotator::new()
        .with_max_unique(2)
        .annotate(SHOP_DDL, &shop(false), true)
        .unwrap();
    assert!(annotated.contains("\"price\" REAL, -- Sample values like: [9.5, 3.0]\n"));

    let annotated = SchemaAnnotator::with_config(&BriefConfig::default().with_max_unique(1))
        .annotate(SHOP_DDL, &shop(false), true)
        .unwrap();
    assert!(annotated.contains("\"stock\" INTEGER -- Sample values like: [4]\n"));
}

#[test]
fn test_rendered_ddl_round_trips_through_annotation() {
    let table = shop(true);
    let ddl = render_create_table(&table);
    assert_eq!(ddl.lines().count(), table.num_columns() + 2);

    let annotated = annotate_schema(&ddl, &table, true).unwrap();
    assert_eq!(annotated.lines().count(), ddl.lines().count());
    assert!(annotated.contains(
        "\"restocked\" TIMESTAMP -- Sample values like: [2022-01-08, 2022-01-09, 2022-01-10, 2022-01-11, 2022-01-12]"
    ));
}

#[test]
fn test_annotate_catalog_joins_tables() {
    let pets = Table::from_columns(
        "pets",
        vec![(
            "kind",
            Arc::new(StringArray::from(vec!["cat", "dog"])) as ArrayRef,
        )],
    )
    .unwrap();
    let shop = shop(false);
    let pets_ddl = render_create_table(&pets);

    let catalog = SchemaAnnotator::new()
        .annotate_catalog(&[(SHOP_DDL, &shop), (pets_ddl.as_str(), &pets)], true)
        .unwrap();

    let blocks: Vec<&str> = catalog.split("\n\n").collect();
    assert_eq!(blocks.len(), 2);
    assert!(blocks[0].starts_with("CREATE TABLE \"shop\" ("));
    assert_eq!(
        blocks[1],
        "CREATE TABLE \"pets\" (\n\"kind\" TEXT -- Sample values like: [cat, dog]\n)\n"
    );
}

#[test]
fn test_windows_line_endings_are_kept() {
    let ddl = SHOP_DDL.replace('\n', "\r\n") + "\r\n";
    let annotated = annotate_schema(&ddl, &shop(false), true).unwrap();

    assert!(annotated.ends_with(")\r\n"));
    assert!(annotated.contains("\"sku\" TEXT, -- Sample values like: [a-1, b-2, c-3]\r\n"));
    assert_eq!(annotated.matches("\r\n").count(), ddl.matches("\r\n").count());
}
