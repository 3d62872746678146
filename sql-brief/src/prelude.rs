//! Prelude for commonly used types and traits in sql-brief.

pub use crate::analyzers::{summarize, ColumnProfile, SemanticType, TableSummarizer, TableSummary};
pub use crate::config::BriefConfig;
pub use crate::error::{BriefError, BriefResult};
pub use crate::formatters::{JsonFormatter, SummaryFormatter, TextFormatter};
pub use crate::logging::LogConfig;
pub use crate::schema::{annotate_schema, render_create_table, SchemaAnnotator};
pub use crate::sources::{CsvOptions, CsvSource, TableSource};
pub use crate::table::{Column, Table};
pub use crate::types::Value;
