//! # sql-brief - Table summaries for text-to-SQL prompts
//!
//! sql-brief condenses tabular data into compact, structured facts that a
//! language model can ground a query on. It leverages Apache Arrow for the
//! in-memory representation and DataFusion for ingestion and execution.
//!
//! ## Overview
//!
//! Given a table snapshot, sql-brief produces:
//!
//! - a **column profile** per column: semantic type, missing data, sample
//!   values, type-specific statistics, and for non-numeric columns the values
//!   sitting next to numeric extremes plus a frequency distribution
//! - an **annotated schema**: `CREATE TABLE` text with a few distinct values
//!   appended to every column line
//!
//! Both are rendered as prompt text and are also available as JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use sql_brief::prelude::*;
//!
//! # fn example() -> BriefResult<()> {
//! let table = Table::from_columns(
//!     "sales",
//!     vec![
//!         ("region", Arc::new(StringArray::from(vec!["north", "south", "east"])) as ArrayRef),
//!         ("revenue", Arc::new(Float64Array::from(vec![5.0, 2.0, 9.0])) as ArrayRef),
//!     ],
//! )?;
//!
//! // Statistical summary for a visualization prompt
//! let (summary_text, summary) = summarize(&table, &BriefConfig::default())?;
//! assert!(summary_text.contains("For revenue, the value 'east' corresponds to the Max value '9.0'"));
//! let json = summary.to_json()?;
//!
//! // Annotated schema for a text-to-SQL prompt
//! let ddl = render_create_table(&table);
//! let schema = annotate_schema(&ddl, &table, true)?;
//! assert!(schema.contains("\"region\" TEXT, -- Sample values like: [north, south, east]"));
//! # let _ = json;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Loading CSV files
//!
//! ```rust,no_run
//! use datafusion::prelude::SessionContext;
//! use sql_brief::prelude::*;
//! use sql_brief::sources::load_csv_dir;
//!
//! # async fn example() -> BriefResult<()> {
//! let ctx = SessionContext::new();
//! let tables = load_csv_dir(&ctx, "data").await?;
//! for table in &tables {
//!     let (text, _) = summarize(table, &BriefConfig::default())?;
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//!
//! Everything except the sampling of high-cardinality columns is a pure
//! function of the table. Set [`BriefConfig::seed`](config::BriefConfig) to
//! make samples reproducible.

pub mod analyzers;
pub mod config;
pub mod error;
pub mod formatters;
pub mod inference;
pub mod logging;
pub mod prelude;
pub mod schema;
pub mod sources;
pub mod table;
pub mod types;
