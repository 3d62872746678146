//! Profiles every CSV file of a directory and prints the prompt context.
//!
//! This example shows how to:
//! - Load a directory of CSV files into table snapshots
//! - Print the statistical summary of each table
//! - Print the sample-annotated schema of the whole catalog
//!
//! Run with:
//! ```bash
//! cargo run --example profile_csv -- path/to/csv_dir
//! ```
//!
//! Without an argument a small sample catalog is generated.

use datafusion::prelude::SessionContext;
use sql_brief::logging::setup::{init_logging, LoggingConfig};
use sql_brief::prelude::*;
use sql_brief::sources::load_csv_dir;

const ORDERS: &str = "Order Id,Customer,Status,Amount,Order Date
1,Alice Johnson,shipped,150.50,2023-01-15
2,Bob Smith,pending,200.00,2023-02-20
3,Carol Davis,shipped,75.25,2023-03-10
4,David Wilson,cancelled,300.00,2023-04-05
5,Alice Johnson,shipped,,2023-05-12
6,Frank Miller,pending,180.00,2023-06-18
";

const PRODUCTS: &str = "Sku,Name,Unit Price,Stock
A-1,Desk Lamp,24.99,12
B-7,Office Chair,129.00,3
C-3,Notebook,2.49,240
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default().with_brief_level(tracing::Level::INFO))?;

    // Keep the generated directory alive until the end of main.
    let generated;
    let dir = match std::env::args().nth(1) {
        Some(dir) => std::path::PathBuf::from(dir),
        None => {
            generated = tempfile::tempdir()?;
            std::fs::write(generated.path().join("orders.csv"), ORDERS)?;
            std::fs::write(generated.path().join("products.csv"), PRODUCTS)?;
            generated.path().to_path_buf()
        }
    };

    let ctx = SessionContext::new();
    let tables = load_csv_dir(&ctx, &dir).await?;
    if tables.is_empty() {
        println!("No CSV files found in {}", dir.display());
        return Ok(());
    }

    let config = BriefConfig::default().with_seed(42);
    for table in &tables {
        let (text, _) = summarize(table, &config)?;
        println!("=== {} ({} rows) ===\n", table.name(), table.row_count());
        println!("{text}");
    }

    let ddls: Vec<String> = tables.iter().map(render_create_table).collect();
    let entries: Vec<(&str, &Table)> = ddls.iter().map(String::as_str).zip(tables.iter()).collect();
    let schema = SchemaAnnotator::with_config(&config).annotate_catalog(&entries, true)?;
    println!("=== Annotated schema ===\n");
    println!("{schema}");

    let (_, summary) = summarize(&tables[0], &config)?;
    println!("=== JSON summary of {} ===\n", summary.table_name());
    println!("{}", summary.to_json()?);

    Ok(())
}
