//! Table-definition text for query-generation prompts.
//!
//! - [`render_create_table`] derives a `CREATE TABLE` statement from a table's
//!   own metadata.
//! - [`SchemaAnnotator`] appends sample values to each column line of such a
//!   statement, so a model sees what the data actually looks like.

pub mod annotator;
pub mod ddl;

pub use annotator::{annotate_schema, SchemaAnnotator};
pub use ddl::{render_create_table, sql_type_name};
