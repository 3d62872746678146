//! Rendering of table summaries.
//!
//! Formatters walk a finished [`TableSummary`] and never compute anything
//! themselves, so the rendered text always agrees with the structured profile.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, StringArray};
//! use sql_brief::analyzers::TableSummarizer;
//! use sql_brief::formatters::{JsonFormatter, SummaryFormatter, TextFormatter};
//! use sql_brief::table::Table;
//!
//! let table = Table::from_columns(
//!     "pets",
//!     vec![("kind", Arc::new(StringArray::from(vec!["cat", "dog", "cat"])) as ArrayRef)],
//! )
//! .unwrap();
//! let summary = TableSummarizer::new().profile(&table);
//!
//! let text = TextFormatter::new().format(&summary).unwrap();
//! assert!(text.contains("  * Value counts in the column:\n    cat: 2\n    dog: 1\n"));
//!
//! let json = JsonFormatter::new().with_pretty(false).format(&summary).unwrap();
//! assert!(json.starts_with(r#"{"kind":{"dtype":"generic""#));
//! ```

use std::fmt;

use crate::analyzers::correspondence::CorrespondenceMap;
use crate::analyzers::distribution::DistributionMap;
use crate::analyzers::profiler::{ColumnProfile, Sampling, TypeStatistics};
use crate::analyzers::summarizer::TableSummary;
use crate::error::BriefResult;
use crate::types::Value;

/// Trait for rendering table summaries into an output format.
///
/// # Examples
///
/// ```rust
/// use sql_brief::analyzers::TableSummary;
/// use sql_brief::formatters::SummaryFormatter;
///
/// struct ColumnList;
///
/// impl SummaryFormatter for ColumnList {
///     fn format(&self, summary: &TableSummary) -> sql_brief::error::BriefResult<String> {
///         Ok(summary.column_names().join(", "))
///     }
/// }
/// ```
pub trait SummaryFormatter {
    /// Renders a summary into a string.
    fn format(&self, summary: &TableSummary) -> BriefResult<String>;
}

/// Renders summaries as the indented bullet text used for prompt context.
///
/// One block per column, each terminated by a blank line:
///
/// ```text
/// Column Name: region
///   * Data Type: generic
///   * Storage Type: Utf8
///   * Number of Unique Values: 3
///   * Number of Missing Values: 0
///   * Missing Values Percentage: 0.0
///   * All Unique Values: ['north', 'south', 'east']
///   * Values corresponding to Minimum and Maximum in other numeric columns:
///     1) For revenue, the value 'east' corresponds to the Max value '9.0'
///     The value 'north' corresponds to the Min value '1.0'
///   * Value counts in the column:
///     north: 2
///     ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFormatter;

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new() -> Self {
        Self
    }
}

impl SummaryFormatter for TextFormatter {
    fn format(&self, summary: &TableSummary) -> BriefResult<String> {
        Ok(SummaryText(summary).to_string())
    }
}

/// Renders summaries as a JSON map from column name to profile.
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter producing pretty-printed output.
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryFormatter for JsonFormatter {
    fn format(&self, summary: &TableSummary) -> BriefResult<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(summary)?
        } else {
            serde_json::to_string(summary)?
        };
        Ok(json)
    }
}

struct SummaryText<'a>(&'a TableSummary);

impl fmt::Display for SummaryText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for profile in self.0.profiles() {
            write!(f, "{}", ProfileText(profile))?;
        }
        Ok(())
    }
}

struct ProfileText<'a>(&'a ColumnProfile);

impl fmt::Display for ProfileText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;
        writeln!(f, "Column Name: {}", profile.column_name)?;

        let general = &profile.general;
        writeln!(f, "  * Data Type: {}", general.semantic_type)?;
        writeln!(f, "  * Storage Type: {}", general.storage_type)?;
        writeln!(f, "  * Number of Unique Values: {}", general.distinct_count)?;

        let missing = &profile.missing;
        writeln!(f, "  * Number of Missing Values: {}", missing.missing_values)?;
        writeln!(
            f,
            "  * Missing Values Percentage: {}",
            Value::float(missing.missing_percentage)
        )?;
        if missing.empty {
            writeln!(f, "  * Empty Column: true")?;
        }

        match &profile.sampling {
            Some(Sampling::ExampleSamples(values)) => {
                writeln!(f, "  * Column Samples: {}", ValueList(values))?
            }
            Some(Sampling::UniqueValues(values)) => {
                writeln!(f, "  * All Unique Values: {}", ValueList(values))?
            }
            None => {}
        }

        match &profile.statistics {
            Some(TypeStatistics::Numeric(s)) => {
                writeln!(f, "  * Mean: {}", s.mean)?;
                writeln!(f, "  * STD: {}", s.std)?;
                writeln!(f, "  * Min: {}", s.min)?;
                writeln!(f, "  * 25th Percentile: {}", s.p25)?;
                writeln!(f, "  * 50th Percentile: {}", s.p50)?;
                writeln!(f, "  * 75th Percentile: {}", s.p75)?;
                writeln!(f, "  * Max: {}", s.max)?;
            }
            Some(TypeStatistics::Datetime(range)) => {
                writeln!(f, "  * Min Date: {}", range.min_date)?;
                writeln!(f, "  * Max Date: {}", range.max_date)?;
            }
            Some(TypeStatistics::Categorical(labels)) => {
                writeln!(f, "  * Categories: {}", ValueList(&labels.categories))?;
            }
            None => {}
        }

        if let Some(map) = &profile.correspondence {
            write!(f, "{}", CorrespondenceText(map))?;
        }
        if let Some(distribution) = &profile.distribution {
            write!(f, "{}", DistributionText(distribution))?;
        }

        writeln!(f)
    }
}

struct ValueList<'a>(&'a [Value]);

impl fmt::Display for ValueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value.quoted())?;
        }
        write!(f, "]")
    }
}

struct CorrespondenceText<'a>(&'a CorrespondenceMap);

impl fmt::Display for CorrespondenceText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        writeln!(
            f,
            "  * Values corresponding to Minimum and Maximum in other numeric columns:"
        )?;
        for (i, entry) in self.0.entries().iter().enumerate() {
            writeln!(
                f,
                "    {}) For {}, the value '{}' corresponds to the Max value '{}'",
                i + 1,
                entry.numeric_column,
                entry.at_max.value,
                entry.at_max.extreme
            )?;
            writeln!(
                f,
                "    The value '{}' corresponds to the Min value '{}'",
                entry.at_min.value, entry.at_min.extreme
            )?;
        }
        Ok(())
    }
}

struct DistributionText<'a>(&'a DistributionMap);

impl fmt::Display for DistributionText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  * Value counts in the column:")?;
        match self.0 {
            DistributionMap::All(counts) => {
                for (value, count) in counts {
                    writeln!(f, "    {value}: {count}")?;
                }
            }
            DistributionMap::Split { k, top, bottom } => {
                writeln!(f, "    Top {k} values:")?;
                for (value, count) in top {
                    writeln!(f, "      {value}: {count}")?;
                }
                writeln!(f, "    Bottom {k} values:")?;
                for (value, count) in bottom {
                    writeln!(f, "      {value}: {count}")?;
                }
            }
        }
        Ok(())
    }
}
