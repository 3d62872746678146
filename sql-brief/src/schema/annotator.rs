//! Sample-value annotation of table-definition text.
//!
//! The text is expected to hold one header line, one line per column in table
//! order, and one footer line, which is the shape SQLite reports for a
//! `CREATE TABLE` statement. Each column line gets a trailing SQL comment
//! listing a few distinct values of the matching column.

use tracing::{debug, instrument};

use crate::config::{BriefConfig, DEFAULT_MAX_UNIQUE};
use crate::error::{BriefError, BriefResult};
use crate::table::Table;

const SAMPLE_MARKER: &str = " -- Sample values like: ";

/// Injects sample values into table-definition text.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use sql_brief::schema::SchemaAnnotator;
/// use sql_brief::table::Table;
///
/// let table = Table::from_columns(
///     "users",
///     vec![
///         ("id", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
///         ("name", Arc::new(StringArray::from(vec!["ann", "bo"])) as ArrayRef),
///     ],
/// )
/// .unwrap();
///
/// let ddl = "CREATE TABLE \"users\" (\n\"id\" INTEGER,\n  \"name\" TEXT\n)";
/// let annotated = SchemaAnnotator::new().annotate(ddl, &table, true).unwrap();
/// assert_eq!(
///     annotated,
///     "CREATE TABLE \"users\" (\n\
///      \"id\" INTEGER, -- Sample values like: [1, 2]\n  \
///      \"name\" TEXT -- Sample values like: [ann, bo]\n\
///      )"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SchemaAnnotator {
    max_unique: usize,
}

impl Default for SchemaAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaAnnotator {
    /// Creates an annotator listing up to five values per column.
    pub fn new() -> Self {
        Self {
            max_unique: DEFAULT_MAX_UNIQUE,
        }
    }

    /// Creates an annotator from a shared configuration.
    pub fn with_config(config: &BriefConfig) -> Self {
        Self {
            max_unique: config.max_unique,
        }
    }

    /// Sets the maximum number of values listed per column line.
    pub fn with_max_unique(mut self, max_unique: usize) -> Self {
        self.max_unique = max_unique;
        self
    }

    /// Annotates `raw` with sample values from `table`.
    ///
    /// With `with_samples = false` the input is returned unchanged and its
    /// shape is not checked. Otherwise the number of lines between header and
    /// footer must equal the table's column count, or
    /// [`BriefError::InputShape`] is returned.
    #[instrument(skip_all, fields(table = table.name(), with_samples = with_samples))]
    pub fn annotate(&self, raw: &str, table: &Table, with_samples: bool) -> BriefResult<String> {
        if !with_samples {
            return Ok(raw.to_string());
        }

        let (body, trailing_newline) = match raw.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (raw, false),
        };
        let lines: Vec<&str> = body.split('\n').collect();
        let column_lines = lines.len().saturating_sub(2);
        if lines.len() < 2 || column_lines != table.num_columns() {
            return Err(BriefError::InputShape {
                table: table.name().to_string(),
                lines: column_lines,
                columns: table.num_columns(),
            });
        }

        let last = lines.len() - 1;
        let mut out = String::with_capacity(raw.len() * 2);
        for (position, line) in lines.iter().enumerate() {
            if position > 0 {
                out.push('\n');
            }
            if position == 0 || position == last {
                out.push_str(line);
                continue;
            }

            let (content, carriage_return) = match line.strip_suffix('\r') {
                Some(content) => (content, "\r"),
                None => (*line, ""),
            };
            out.push_str(content);
            out.push_str(SAMPLE_MARKER);
            out.push_str(&self.sample_list(table, position - 1));
            out.push_str(carriage_return);
        }
        if trailing_newline {
            out.push('\n');
        }

        debug!(columns = column_lines, "Annotated schema");
        Ok(out)
    }

    /// Annotates several table definitions and joins them with a blank line.
    pub fn annotate_catalog(
        &self,
        entries: &[(&str, &Table)],
        with_samples: bool,
    ) -> BriefResult<String> {
        let mut out = String::new();
        for (i, (raw, table)) in entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let annotated = self.annotate(raw, table, with_samples)?;
            out.push_str(&annotated);
            if !annotated.ends_with('\n') {
                out.push('\n');
            }
        }
        Ok(out)
    }

    fn sample_list(&self, table: &Table, index: usize) -> String {
        let values = table
            .column(index)
            .map(|column| column.distinct_values())
            .unwrap_or_default();
        let listed: Vec<String> = values
            .iter()
            .take(self.max_unique)
            .map(ToString::to_string)
            .collect();
        format!("[{}]", listed.join(", "))
    }
}

/// Annotates `raw` with the default number of sample values per column.
pub fn annotate_schema(raw: &str, table: &Table, with_samples: bool) -> BriefResult<String> {
    SchemaAnnotator::new().annotate(raw, table, with_samples)
}
