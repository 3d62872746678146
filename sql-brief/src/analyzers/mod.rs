//! Column profiling and table summarization.
//!
//! This module turns a [`Table`](crate::table::Table) snapshot into compact,
//! structured facts a language model can ground a query on.
//!
//! ## Components
//!
//! - **Type Classifier** (`classifier`): maps storage types to a semantic
//!   category (numeric, datetime, categorical, generic)
//! - **Column Profiler** (`profiler`): general, missing, sampling and
//!   type-specific steps per column
//! - **Correspondence Analyzer** (`correspondence`): values of a non-numeric
//!   column on the rows where each numeric column peaks
//! - **Distribution Reporter** (`distribution`): frequency counts, full or
//!   split into most and least frequent values
//! - **Table Summarizer** (`summarizer`): runs the profiler over every column
//!   and renders the result
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array, StringArray};
//! use sql_brief::analyzers::summarize;
//! use sql_brief::config::BriefConfig;
//! use sql_brief::table::Table;
//!
//! let table = Table::from_columns(
//!     "cities",
//!     vec![
//!         ("city", Arc::new(StringArray::from(vec!["Oslo", "Lima", "Pune"])) as ArrayRef),
//!         ("population", Arc::new(Float64Array::from(vec![0.7, 10.1, 3.1])) as ArrayRef),
//!     ],
//! )
//! .unwrap();
//!
//! let (text, summary) = summarize(&table, &BriefConfig::default().with_seed(1)).unwrap();
//! assert!(text.contains("1) For population, the value 'Lima' corresponds to the Max value '10.1'"));
//! assert_eq!(summary.profiles().len(), 2);
//! ```

pub mod classifier;
pub mod context;
pub mod correspondence;
pub mod distribution;
pub mod profiler;
mod statistics;
pub mod summarizer;


pub use classifier::{NumericKind, SemanticType, TypeClassifier};
pub use context::ProfilingContext;
pub use correspondence::{
    numeric_extremes, Correspondence, CorrespondenceAnalyzer, CorrespondenceMap, ExtremeMatch,
    NumericExtreme,
};
pub use distribution::{value_counts, DistributionMap, DistributionReporter};
pub use profiler::{
    CategoricalLabels, ColumnProfile, ColumnProfiler, ColumnProfilerBuilder, DatetimeRange,
    GeneralProperties, MissingProperties, NumericSummary, Sampling, TypeStatistics,
};
pub use summarizer::{summarize, TableSummarizer, TableSummary};
