//! Per-column inputs shared by the profiling steps.
//!
//! A [`ProfilingContext`] is computed once per column and handed, read-only,
//! to each profiling step. Steps never talk to each other; each one reads the
//! context and returns its own block of the final profile.

use crate::analyzers::classifier::{NumericKind, SemanticType};
use crate::table::{distinct_non_null, Column};
use crate::types::Value;

/// Read-only facts about one column, gathered in a single pass.
#[derive(Debug, Clone)]
pub struct ProfilingContext<'a> {
    column: Column<'a>,
    semantic_type: SemanticType,
    numeric_kind: Option<NumericKind>,
    row_count: usize,
    values: Vec<Value>,
    distinct: Vec<Value>,
}

impl<'a> ProfilingContext<'a> {
    /// Gathers the inputs for `column` of a table with `row_count` rows.
    pub fn new(column: Column<'a>, row_count: usize) -> Self {
        let values = column.values();
        let distinct = distinct_non_null(&values);
        Self {
            semantic_type: column.semantic_type(),
            numeric_kind: column.numeric_kind(),
            column,
            row_count,
            values,
            distinct,
        }
    }

    /// The column being profiled.
    pub fn column(&self) -> &Column<'a> {
        &self.column
    }

    /// Semantic category of the column.
    pub fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    /// Integer vs floating subtype, for numeric columns.
    pub fn numeric_kind(&self) -> Option<NumericKind> {
        self.numeric_kind
    }

    /// Row count of the owning table.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Row values, nulls included.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Distinct non-null values in first-seen order.
    pub fn distinct(&self) -> &[Value] {
        &self.distinct
    }

    /// Number of missing entries.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Whether at least one non-null value exists.
    pub fn has_values(&self) -> bool {
        !self.distinct.is_empty()
    }
}
