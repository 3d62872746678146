//! Table-level summarization.
//!
//! The [`TableSummarizer`] profiles every column of a table in table order and
//! renders the result as prompt-ready text. Numeric extremes are located once
//! per table and shared by every non-numeric column's correspondence step.

use std::time::Instant;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{info, instrument};

use crate::analyzers::correspondence::numeric_extremes;
use crate::analyzers::profiler::{ColumnProfile, ColumnProfiler};
use crate::config::BriefConfig;
use crate::error::BriefResult;
use crate::formatters::{SummaryFormatter, TextFormatter};
use crate::table::Table;

/// Column profiles of one table, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    table_name: String,
    row_count: usize,
    profiles: Vec<ColumnProfile>,
}

impl TableSummary {
    /// Name of the summarized table
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Row count of the summarized table
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Profiles in table column order
    pub fn profiles(&self) -> &[ColumnProfile] {
        &self.profiles
    }

    /// Profile of a column by name
    pub fn get(&self, column: &str) -> Option<&ColumnProfile> {
        self.profiles.iter().find(|p| p.column_name == column)
    }

    /// Profiled column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.column_name.as_str()).collect()
    }

    /// Serializes the profile map as pretty JSON.
    pub fn to_json(&self) -> BriefResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serializes as a map from column name to profile, preserving column order.
impl Serialize for TableSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.profiles.len()))?;
        for profile in &self.profiles {
            map.serialize_entry(&profile.column_name, profile)?;
        }
        map.end()
    }
}

/// Profiles whole tables and renders them for prompt context.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use sql_brief::analyzers::TableSummarizer;
/// use sql_brief::table::Table;
///
/// let table = Table::from_columns(
///     "orders",
///     vec![
///         ("status", Arc::new(StringArray::from(vec!["open", "closed", "open"])) as ArrayRef),
///         ("amount", Arc::new(Int64Array::from(vec![10, 30, 20])) as ArrayRef),
///     ],
/// )
/// .unwrap();
///
/// let (text, summary) = TableSummarizer::new().summarize(&table).unwrap();
/// assert!(text.starts_with("Column Name: status\n"));
/// assert_eq!(summary.column_names(), vec!["status", "amount"]);
/// ```
pub struct TableSummarizer {
    profiler: ColumnProfiler,
    formatter: Box<dyn SummaryFormatter + Send + Sync>,
}

impl Default for TableSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSummarizer {
    /// Creates a summarizer with default configuration and text rendering.
    pub fn new() -> Self {
        Self::with_config(BriefConfig::default())
    }

    /// Creates a summarizer with an explicit configuration.
    pub fn with_config(config: BriefConfig) -> Self {
        Self {
            profiler: ColumnProfiler::with_config(config),
            formatter: Box::new(TextFormatter::new()),
        }
    }

    /// Replaces the renderer used by [`TableSummarizer::summarize`].
    pub fn with_formatter(mut self, formatter: impl SummaryFormatter + Send + Sync + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// The underlying column profiler
    pub fn profiler(&self) -> &ColumnProfiler {
        &self.profiler
    }

    /// Profiles every column of `table` without rendering.
    pub fn profile(&self, table: &Table) -> TableSummary {
        let extremes = numeric_extremes(table);
        let mut rng = self.profiler.sampling_rng();
        let profiles = table
            .columns()
            .map(|column| self.profiler.profile_column(table, column, &extremes, &mut rng))
            .collect();

        TableSummary {
            table_name: table.name().to_string(),
            row_count: table.row_count(),
            profiles,
        }
    }

    /// Profiles `table` and renders the result.
    ///
    /// Returns the rendered text together with the structured summary it was
    /// rendered from.
    #[instrument(skip_all, fields(table = table.name(), columns = table.num_columns()))]
    pub fn summarize(&self, table: &Table) -> BriefResult<(String, TableSummary)> {
        let start = Instant::now();
        let summary = self.profile(table);
        let text = self.formatter.format(&summary)?;

        info!(
            rows = table.row_count(),
            time_ms = start.elapsed().as_millis() as u64,
            "Summarized table"
        );
        Ok((text, summary))
    }
}

/// Summarizes `table` as text with the given configuration.
pub fn summarize(table: &Table, config: &BriefConfig) -> BriefResult<(String, TableSummary)> {
    config.validate()?;
    TableSummarizer::with_config(config.clone()).summarize(table)
}
