//! Column profiling for prompt grounding.
//!
//! The ColumnProfiler builds a [`ColumnProfile`] from independent steps that
//! run in a fixed order:
//!
//! 1. **General**: semantic type, storage type, distinct non-null count
//! 2. **Missing**: null count and percentage of rows
//! 3. **Sampling**: every distinct value for low-cardinality columns, a random
//!    sample of distinct values otherwise
//! 4. **Type-specific**: numeric summary, datetime range or declared categories
//! 5. **Non-numeric extras**: correspondence with numeric extremes and the
//!    value distribution
//!
//! Steps 3 and 4 are skipped for columns without any non-null value; step 5
//! is skipped for numeric columns.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Float64Array};
//! use sql_brief::analyzers::profiler::{ColumnProfiler, TypeStatistics};
//! use sql_brief::table::Table;
//! use sql_brief::types::Value;
//!
//! let table = Table::from_columns(
//!     "prices",
//!     vec![("price", Arc::new(Float64Array::from(vec![Some(1.0), None, Some(3.0)])) as ArrayRef)],
//! )
//! .unwrap();
//!
//! let profiler = ColumnProfiler::builder().seed(1).build();
//! let profile = profiler.profile_column_by_name(&table, "price").unwrap();
//!
//! assert_eq!(profile.missing.missing_values, 1);
//! match profile.statistics {
//!     Some(TypeStatistics::Numeric(summary)) => assert_eq!(summary.mean, Value::float(2.0)),
//!     _ => unreachable!(),
//! }
//! ```

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::analyzers::classifier::{NumericKind, SemanticType};
use crate::analyzers::context::ProfilingContext;
use crate::analyzers::correspondence::{
    numeric_extremes, CorrespondenceAnalyzer, CorrespondenceMap, NumericExtreme,
};
use crate::analyzers::distribution::{DistributionMap, DistributionReporter};
use crate::analyzers::statistics::{mean, mean_i64, quantile, quantile_i64, sample_std_dev};
use crate::config::BriefConfig;
use crate::error::BriefResult;
use crate::table::{Column, Table};
use crate::types::Value;

/// General properties present on every profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralProperties {
    /// Semantic type tag
    #[serde(rename = "dtype")]
    pub semantic_type: SemanticType,
    /// Declared Arrow storage type
    pub storage_type: String,
    /// Number of distinct non-null values
    #[serde(rename = "num_unique_values")]
    pub distinct_count: u64,
}

/// Missing-data properties present on every profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingProperties {
    /// Number of null entries
    pub missing_values: u64,
    /// Share of null entries, in percent of rows
    pub missing_percentage: f64,
    /// Set when the table has no rows at all
    #[serde(rename = "empty_column", skip_serializing_if = "std::ops::Not::not")]
    pub empty: bool,
}

/// Sample values of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Sampling {
    /// All distinct values, in first-seen order
    #[serde(rename = "unique values")]
    UniqueValues(Vec<Value>),
    /// A random sample of distinct values
    #[serde(rename = "example samples")]
    ExampleSamples(Vec<Value>),
}

impl Sampling {
    /// The sampled values, whichever mode produced them.
    pub fn values(&self) -> &[Value] {
        match self {
            Sampling::UniqueValues(values) | Sampling::ExampleSamples(values) => values,
        }
    }
}

/// Summary statistics of a numeric column, cast to its numeric subtype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub mean: Value,
    /// Sample standard deviation; null below two observations
    pub std: Value,
    pub min: Value,
    #[serde(rename = "25th_percentile")]
    pub p25: Value,
    #[serde(rename = "50th_percentile")]
    pub p50: Value,
    #[serde(rename = "75th_percentile")]
    pub p75: Value,
    pub max: Value,
}

/// Observed range of a datetime column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatetimeRange {
    pub min_date: Value,
    pub max_date: Value,
}

/// Declared labels of a categorical column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalLabels {
    pub categories: Vec<Value>,
}

/// Statistics that depend on the semantic type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeStatistics {
    Numeric(NumericSummary),
    Datetime(DatetimeRange),
    Categorical(CategoricalLabels),
}

/// Complete profile of one column.
///
/// Serializes as one flat JSON object; blocks that do not apply to the
/// column's type are absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    #[serde(skip)]
    pub column_name: String,
    #[serde(flatten)]
    pub general: GeneralProperties,
    #[serde(flatten)]
    pub missing: MissingProperties,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub sampling: Option<Sampling>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<TypeStatistics>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub correspondence: Option<CorrespondenceMap>,
    #[serde(rename = "value_counts", skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionMap>,
}

/// Builder for ColumnProfiler
pub struct ColumnProfilerBuilder {
    config: BriefConfig,
}

impl ColumnProfilerBuilder {
    /// Set the distinct count above which sampling and split reporting apply
    pub fn many_uniques_threshold(mut self, threshold: usize) -> Self {
        self.config.many_uniques_threshold = threshold;
        self
    }

    /// Set the number of example samples
    pub fn sample_size(mut self, size: usize) -> Self {
        self.config.sample_size = size;
        self
    }

    /// Fix the sampling seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: BriefConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the ColumnProfiler
    pub fn build(self) -> ColumnProfiler {
        ColumnProfiler::with_config(self.config)
    }
}

/// Computes column profiles from table snapshots.
#[derive(Debug, Clone)]
pub struct ColumnProfiler {
    config: BriefConfig,
    distribution: DistributionReporter,
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl ColumnProfiler {
    /// Create a new builder for ColumnProfiler
    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder {
            config: BriefConfig::default(),
        }
    }

    /// Create a ColumnProfiler with default configuration
    pub fn new() -> Self {
        Self::with_config(BriefConfig::default())
    }

    /// Create a ColumnProfiler from an explicit configuration
    pub fn with_config(config: BriefConfig) -> Self {
        Self {
            distribution: DistributionReporter::from_config(&config),
            config,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &BriefConfig {
        &self.config
    }

    /// Random source for the sampling step: seeded when configured, OS
    /// entropy otherwise.
    pub fn sampling_rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Profile a single column by name.
    ///
    /// Numeric extremes of the table are located for this call only; use
    /// [`ColumnProfiler::profile_column`] when profiling many columns.
    pub fn profile_column_by_name(&self, table: &Table, name: &str) -> BriefResult<ColumnProfile> {
        let column = table.column_by_name(name)?;
        let extremes = numeric_extremes(table);
        let mut rng = self.sampling_rng();
        Ok(self.profile_column(table, column, &extremes, &mut rng))
    }

    /// Profile a single column of `table`.
    ///
    /// `extremes` are the numeric extremes of the same table, as returned by
    /// [`numeric_extremes`].
    #[instrument(skip_all, fields(table = table.name(), column = column.name()))]
    pub fn profile_column<R: Rng + ?Sized>(
        &self,
        table: &Table,
        column: Column<'_>,
        extremes: &[NumericExtreme],
        rng: &mut R,
    ) -> ColumnProfile {
        let ctx = ProfilingContext::new(column, table.row_count());

        let general = general_properties(&ctx);
        let missing = missing_properties(&ctx);
        let sampling = self.sampling(&ctx, rng);
        let statistics = type_statistics(&ctx);
        let (correspondence, distribution) = if ctx.semantic_type().is_numeric() {
            (None, None)
        } else {
            (
                Some(CorrespondenceAnalyzer::analyze(
                    column.index(),
                    ctx.values(),
                    extremes,
                )),
                Some(self.distribution.report(ctx.values())),
            )
        };

        debug!(
            semantic_type = %general.semantic_type,
            distinct = general.distinct_count,
            missing = missing.missing_values,
            "Profiled column"
        );

        ColumnProfile {
            column_name: column.name().to_string(),
            general,
            missing,
            sampling,
            statistics,
            correspondence,
            distribution,
        }
    }

    fn sampling<R: Rng + ?Sized>(
        &self,
        ctx: &ProfilingContext<'_>,
        rng: &mut R,
    ) -> Option<Sampling> {
        let distinct = ctx.distinct();
        if distinct.is_empty() {
            return None;
        }
        if distinct.len() > self.config.many_uniques_threshold {
            let amount = self.config.sample_size.min(distinct.len());
            let picked = rand::seq::index::sample(rng, distinct.len(), amount)
                .into_iter()
                .map(|i| distinct[i].clone())
                .collect();
            Some(Sampling::ExampleSamples(picked))
        } else {
            Some(Sampling::UniqueValues(distinct.to_vec()))
        }
    }
}

fn general_properties(ctx: &ProfilingContext<'_>) -> GeneralProperties {
    GeneralProperties {
        semantic_type: ctx.semantic_type(),
        storage_type: ctx.column().data_type().to_string(),
        distinct_count: ctx.distinct().len() as u64,
    }
}

fn missing_properties(ctx: &ProfilingContext<'_>) -> MissingProperties {
    let missing = ctx.missing_count();
    let missing_percentage = if ctx.row_count() == 0 {
        0.0
    } else {
        missing as f64 / ctx.row_count() as f64 * 100.0
    };
    MissingProperties {
        missing_values: missing as u64,
        missing_percentage,
        empty: ctx.row_count() == 0,
    }
}

fn type_statistics(ctx: &ProfilingContext<'_>) -> Option<TypeStatistics> {
    if !ctx.has_values() {
        return None;
    }
    match ctx.semantic_type() {
        SemanticType::Numeric => {
            let kind = ctx.numeric_kind().unwrap_or(NumericKind::Floating);
            numeric_summary(ctx.values(), kind).map(TypeStatistics::Numeric)
        }
        SemanticType::Datetime => {
            let observed = ctx.values().iter().filter(|v| !v.is_null());
            let min_date = observed.clone().min()?.clone();
            let max_date = observed.max()?.clone();
            Some(TypeStatistics::Datetime(DatetimeRange { min_date, max_date }))
        }
        SemanticType::Categorical => ctx
            .column()
            .categories()
            .map(|categories| TypeStatistics::Categorical(CategoricalLabels { categories })),
        SemanticType::Generic => None,
    }
}

fn numeric_summary(values: &[Value], kind: NumericKind) -> Option<NumericSummary> {
    let observed: Vec<&Value> = values.iter().filter(|v| v.as_f64().is_some()).collect();
    let min = observed
        .iter()
        .copied()
        .min_by(|a, b| a.numeric_cmp(b).unwrap_or(Ordering::Equal))?;
    let max = observed
        .iter()
        .copied()
        .max_by(|a, b| a.numeric_cmp(b).unwrap_or(Ordering::Equal))?;

    let mut numbers: Vec<f64> = observed.iter().filter_map(|v| v.as_f64()).collect();
    numbers.sort_by(f64::total_cmp);
    let std = sample_std_dev(&numbers).map_or(Value::Null, |s| kind.cast(s));

    let integers: Option<Vec<i64>> = observed
        .iter()
        .map(|v| match v {
            Value::Integer(i) => Some(*i),
            _ => None,
        })
        .collect();
    let (mean, p25, p50, p75) = match integers {
        Some(mut integers) if kind == NumericKind::Integer => {
            integers.sort_unstable();
            let at = |q| quantile_i64(&integers, q).map_or(Value::Null, Value::Integer);
            (
                mean_i64(&integers).map_or(Value::Null, Value::Integer),
                at(0.25),
                at(0.50),
                at(0.75),
            )
        }
        _ => (
            kind.cast(mean(&numbers)),
            kind.cast(quantile(&numbers, 0.25)),
            kind.cast(quantile(&numbers, 0.50)),
            kind.cast(quantile(&numbers, 0.75)),
        ),
    };

    Some(NumericSummary {
        mean,
        std,
        min: kind.cast_value(min),
        p25,
        p50,
        p75,
        max: kind.cast_value(max),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn single_column(name: &str, array: ArrayRef) -> Table {
        Table::from_columns("t", vec![(name, array)]).unwrap()
    }

    #[test]
    fn test_numeric_profile_has_no_extras() {
        let table = single_column(
            "n",
            Arc::new(Int64Array::from(vec![Some(1), Some(2), None, Some(4)])),
        );
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "n")
            .unwrap();

        assert_eq!(profile.general.semantic_type, SemanticType::Numeric);
        assert_eq!(profile.missing.missing_values, 1);
        assert_eq!(profile.missing.missing_percentage, 25.0);
        assert!(profile.correspondence.is_none());
        assert!(profile.distribution.is_none());

        match profile.statistics {
            Some(TypeStatistics::Numeric(summary)) => {
                // mean of 1, 2, 4 is 2.33.., truncated for integer columns
                assert_eq!(summary.mean, Value::Integer(2));
                assert_eq!(summary.min, Value::Integer(1));
                assert_eq!(summary.max, Value::Integer(4));
            }
            other => panic!("expected numeric statistics, got {other:?}"),
        }
    }

    #[test]
    fn test_all_null_column_is_sparse() {
        let table = single_column(
            "n",
            Arc::new(Float64Array::from(vec![None::<f64>, None, None])),
        );
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "n")
            .unwrap();

        assert_eq!(profile.missing.missing_percentage, 100.0);
        assert!(!profile.missing.empty);
        assert!(profile.sampling.is_none());
        assert!(profile.statistics.is_none());
    }

    #[test]
    fn test_zero_row_column_is_degenerate_not_an_error() {
        let table = single_column("s", Arc::new(StringArray::from(Vec::<&str>::new())));
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "s")
            .unwrap();

        assert_eq!(profile.missing.missing_percentage, 0.0);
        assert!(profile.missing.empty);
        assert!(profile.sampling.is_none());
        assert!(profile.statistics.is_none());
        assert_eq!(profile.distribution, Some(DistributionMap::All(vec![])));
    }

    #[test]
    fn test_sampling_modes() {
        let few: Vec<String> = (0..10).map(|i| format!("id{i}")).collect();
        let table = single_column("s", Arc::new(StringArray::from(few.clone())));
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "s")
            .unwrap();
        match profile.sampling {
            Some(Sampling::UniqueValues(values)) => assert_eq!(values.len(), 10),
            other => panic!("expected unique values, got {other:?}"),
        }

        let many: Vec<String> = (0..25).map(|i| format!("id{i}")).collect();
        let table = single_column("s", Arc::new(StringArray::from(many)));
        let column = table.column(0).unwrap();
        let observed: HashSet<Value> = column.distinct_values().into_iter().collect();

        let profile = ColumnProfiler::builder()
            .seed(11)
            .build()
            .profile_column_by_name(&table, "s")
            .unwrap();
        match &profile.sampling {
            Some(Sampling::ExampleSamples(values)) => {
                assert_eq!(values.len(), 5);
                let unique: HashSet<&Value> = values.iter().collect();
                assert_eq!(unique.len(), 5);
                assert!(values.iter().all(|v| observed.contains(v)));
            }
            other => panic!("expected example samples, got {other:?}"),
        }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let many: Vec<String> = (0..40).map(|i| format!("v{i}")).collect();
        let table = single_column("s", Arc::new(StringArray::from(many)));
        let profiler = ColumnProfiler::builder().seed(99).build();

        let first = profiler.profile_column_by_name(&table, "s").unwrap();
        let second = profiler.profile_column_by_name(&table, "s").unwrap();
        assert_eq!(first.sampling, second.sampling);
    }

    #[test]
    fn test_datetime_range() {
        let table = single_column(
            "d",
            Arc::new(Date32Array::from(vec![Some(19_000), None, Some(18_000), Some(19_500)])),
        );
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "d")
            .unwrap();
        match profile.statistics {
            Some(TypeStatistics::Datetime(range)) => {
                assert_eq!(range.min_date.to_string(), "2019-04-14");
                assert_eq!(range.max_date.to_string(), "2023-05-23");
            }
            other => panic!("expected datetime range, got {other:?}"),
        }
    }

    #[test]
    fn test_single_value_std_is_null() {
        let summary = numeric_summary(&[Value::float(3.5)], NumericKind::Floating).unwrap();
        assert_eq!(summary.std, Value::Null);
        assert_eq!(summary.p25, Value::float(3.5));
    }

    #[test]
    fn test_profile_serializes_flat() {
        let table = single_column(
            "s",
            Arc::new(StringArray::from(vec![Some("a"), Some("b"), None, Some("a")])),
        );
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "s")
            .unwrap();
        let json = serde_json::to_value(&profile).unwrap();

        assert_eq!(json["dtype"], "generic");
        assert_eq!(json["storage_type"], "Utf8");
        assert_eq!(json["num_unique_values"], 2);
        assert_eq!(json["missing_values"], 1);
        assert_eq!(json["missing_percentage"], 25.0);
        assert_eq!(json["unique values"], serde_json::json!(["a", "b"]));
        assert_eq!(json["value_counts"]["all_value_counts"]["a"], 2);
        assert!(json.get("corresponding_to_max").is_some());
        assert!(json.get("empty_column").is_none());
        assert!(json.get("mean").is_none());
    }

    #[test]
    fn test_integer_statistics_exact_beyond_f64_precision() {
        let big = 1i64 << 53;
        let table = single_column("id", Arc::new(Int64Array::from(vec![1, big, big + 1])));
        let profile = ColumnProfiler::new()
            .profile_column_by_name(&table, "id")
            .unwrap();

        match profile.statistics {
            Some(TypeStatistics::Numeric(summary)) => {
                assert_eq!(summary.min, Value::Integer(1));
                assert_eq!(summary.max, Value::Integer(9_007_199_254_740_993));
                assert_eq!(summary.p50, Value::Integer(big));
                assert_eq!(summary.p75, Value::Integer(big));
                assert_eq!(summary.mean, Value::Integer(6_004_799_503_160_662));
            }
            other => panic!("expected numeric statistics, got {other:?}"),
        }
    }
}
