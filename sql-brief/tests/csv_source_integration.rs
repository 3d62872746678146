//! Integration tests for loading CSV directories.

use std::fs;

use arrow::array::AsArray;
use arrow::datatypes::Int64Type;
use datafusion::prelude::SessionContext;
use sql_brief::prelude::*;
use sql_brief::sources::load_csv_dir;
use tempfile::TempDir;

fn write_fixtures() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("customers.csv"),
        "Customer Id,Full Name,Country\n1,Ann Lee,NZ\n2,Bo Chen,US\n3,Cy Diaz,US\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("invoices.csv"),
        "Invoice Id,Customer Id,Total\n10,1,99.5\n11,3,12\n12,3,40.25\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not a table\n").unwrap();
    dir
}

#[tokio::test]
async fn test_load_csv_dir_registers_tables() {
    let dir = write_fixtures();
    let ctx = SessionContext::new();

    let tables = load_csv_dir(&ctx, dir.path()).await.unwrap();
    let names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
    assert_eq!(names, vec!["customers", "invoices"]);
    assert_eq!(
        tables[0].column_names(),
        vec!["customer_id", "full_name", "country"]
    );

    // Registered tables answer SQL with normalized column names.
    let batches = ctx
        .sql("SELECT count(*) AS n FROM invoices WHERE customer_id = 3")
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();
    assert_eq!(batches[0].column(0).as_primitive::<Int64Type>().value(0), 2);
}

#[tokio::test]
async fn test_loaded_catalog_summarizes_and_annotates() {
    let dir = write_fixtures();
    let ctx = SessionContext::new();
    let tables = load_csv_dir(&ctx, dir.path()).await.unwrap();

    let ddls: Vec<String> = tables.iter().map(render_create_table).collect();
    let entries: Vec<(&str, &Table)> = ddls.iter().map(String::as_str).zip(tables.iter()).collect();
    let catalog = SchemaAnnotator::new().annotate_catalog(&entries, true).unwrap();

    assert!(catalog.contains("\"country\" TEXT -- Sample values like: [NZ, US]\n"));
    assert!(catalog.contains("\"total\" REAL -- Sample values like: [99.5, 12.0, 40.25]\n"));

    let (text, summary) = summarize(&tables[1], &BriefConfig::default()).unwrap();
    assert_eq!(summary.row_count(), 3);
    assert!(text.contains("Column Name: total\n  * Data Type: numeric\n"));
}

#[tokio::test]
async fn test_sources_behind_trait_objects() {
    let dir = write_fixtures();
    let path = dir.path().join("customers.csv");
    let tsv = dir.path().join("scores.tsv");
    fs::write(&tsv, "name\tscore\nann\t3\nbo\t5\n").unwrap();

    let sources: Vec<Box<dyn TableSource>> = vec![
        Box::new(CsvSource::new(&path).unwrap()),
        Box::new(
            CsvSource::with_options(
                &tsv,
                CsvOptions {
                    delimiter: b'\t',
                    ..Default::default()
                },
            )
            .unwrap(),
        ),
    ];

    let ctx = SessionContext::new();
    let mut loaded = Vec::new();
    for source in &sources {
        assert!(source.description().starts_with("CSV file: "));
        loaded.push(source.load_table(&ctx).await.unwrap());
    }
    assert_eq!(loaded[0].row_count(), 3);
    assert_eq!(loaded[1].name(), "scores");
    assert_eq!(loaded[1].column_names(), vec!["name", "score"]);
}

#[tokio::test]
async fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = SessionContext::new();
    let err = load_csv_dir(&ctx, dir.path().join("absent")).await.unwrap_err();
    assert!(matches!(err, BriefError::Io(_)));
}
