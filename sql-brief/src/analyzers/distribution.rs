//! Frequency distribution reporting for non-numeric columns.
//!
//! Counts are ordered by descending frequency, ties broken by the order in
//! which values were first observed. Low-cardinality columns report every
//! value; high-cardinality columns report only the `K` most and `K` least
//! frequent values, where `K = floor(many_uniques_threshold / 2)`.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::config::BriefConfig;
use crate::types::Value;

/// Reported frequency distribution of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionMap {
    /// Every distinct value with its count
    All(Vec<(Value, u64)>),
    /// The `k` most and `k` least frequent values
    Split {
        k: usize,
        top: Vec<(Value, u64)>,
        bottom: Vec<(Value, u64)>,
    },
}

impl DistributionMap {
    /// Checks if the full distribution is reported.
    pub fn is_full(&self) -> bool {
        matches!(self, DistributionMap::All(_))
    }

    /// Sum of every reported count; duplicates across split halves count twice.
    pub fn reported_total(&self) -> u64 {
        match self {
            DistributionMap::All(counts) => counts.iter().map(|(_, c)| c).sum(),
            DistributionMap::Split { top, bottom, .. } => {
                top.iter().chain(bottom).map(|(_, c)| c).sum()
            }
        }
    }
}

struct CountMap<'a>(&'a [(Value, u64)]);

impl Serialize for CountMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (value, count) in self.0 {
            map.serialize_entry(&value.to_string(), count)?;
        }
        map.end()
    }
}

impl Serialize for DistributionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DistributionMap::All(counts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("all_value_counts", &CountMap(counts))?;
                map.end()
            }
            DistributionMap::Split { k, top, bottom } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(&format!("top_{k}_counts"), &CountMap(top))?;
                map.serialize_entry(&format!("bottom_{k}_counts"), &CountMap(bottom))?;
                map.end()
            }
        }
    }
}

/// Frequency counts of non-null values, descending, ties in first-seen order.
pub fn value_counts(values: &[Value]) -> Vec<(Value, u64)> {
    let mut counts: HashMap<&Value, (usize, u64)> = HashMap::new();
    for (row, value) in values.iter().enumerate() {
        if value.is_null() {
            continue;
        }
        counts.entry(value).or_insert((row, 0)).1 += 1;
    }

    let mut ordered: Vec<(&Value, usize, u64)> = counts
        .into_iter()
        .map(|(value, (first_seen, count))| (value, first_seen, count))
        .collect();
    ordered.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    ordered
        .into_iter()
        .map(|(value, _, count)| (value.clone(), count))
        .collect()
}

/// Chooses between full and top/bottom reporting by cardinality.
#[derive(Debug, Clone)]
pub struct DistributionReporter {
    many_uniques_threshold: usize,
    split_size: usize,
}

impl DistributionReporter {
    /// Creates a reporter switching to split mode above `many_uniques_threshold`
    /// distinct values.
    pub fn new(many_uniques_threshold: usize) -> Self {
        Self::from_config(&BriefConfig::default().with_many_uniques_threshold(many_uniques_threshold))
    }

    pub fn from_config(config: &BriefConfig) -> Self {
        Self {
            many_uniques_threshold: config.many_uniques_threshold,
            split_size: config.split_size(),
        }
    }

    /// Reports the distribution of `values`.
    pub fn report(&self, values: &[Value]) -> DistributionMap {
        let counts = value_counts(values);
        if counts.len() <= self.many_uniques_threshold {
            return DistributionMap::All(counts);
        }

        let k = self.split_size;
        let top = counts.iter().take(k).cloned().collect();
        let bottom = counts[counts.len().saturating_sub(k)..].to_vec();
        DistributionMap::Split { k, top, bottom }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::text(*s)).collect()
    }

    #[test]
    fn test_value_counts_order() {
        let mut values = texts(&["b", "a", "c", "a", "c", "d"]);
        values.push(Value::Null);
        let counts = value_counts(&values);
        assert_eq!(
            counts,
            vec![
                (Value::text("a"), 2),
                (Value::text("c"), 2),
                (Value::text("b"), 1),
                (Value::text("d"), 1),
            ]
        );
    }

    #[test]
    fn test_full_mode_sums_to_non_null_count() {
        let mut values = texts(&["x", "y", "x", "z"]);
        values.push(Value::Null);
        let report = DistributionReporter::new(10).report(&values);
        assert!(report.is_full());
        assert_eq!(report.reported_total(), 4);
    }

    #[test]
    fn test_split_mode_above_threshold() {
        // 12 distinct values, "v0" appearing three times.
        let mut values: Vec<Value> = (0..12).map(|i| Value::text(format!("v{i}"))).collect();
        values.push(Value::text("v0"));
        values.push(Value::text("v0"));
        values.push(Value::text("v5"));

        let report = DistributionReporter::new(10).report(&values);
        match &report {
            DistributionMap::Split { k, top, bottom } => {
                assert_eq!(*k, 5);
                assert_eq!(top.len(), 5);
                assert_eq!(bottom.len(), 5);
                assert_eq!(top[0], (Value::text("v0"), 3));
                assert_eq!(top[1], (Value::text("v5"), 2));
                assert_eq!(bottom.last(), Some(&(Value::text("v11"), 1)));
            }
            other => panic!("expected split mode, got {other:?}"),
        }

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["top_5_counts"]["v0"], 3);
        assert_eq!(json["bottom_5_counts"]["v11"], 1);
    }

    #[test]
    fn test_split_halves_take_k_each() {
        let values: Vec<Value> = (0..4).map(Value::Integer).collect();
        let report = DistributionReporter::new(3).report(&values);
        assert_eq!(
            report,
            DistributionMap::Split {
                k: 1,
                top: vec![(Value::Integer(0), 1)],
                bottom: vec![(Value::Integer(3), 1)],
            }
        );

        let report = DistributionReporter::new(7).report(&values);
        assert!(report.is_full());
    }

    #[test]
    fn test_split_size_follows_config() {
        let config = BriefConfig::default().with_many_uniques_threshold(5);
        let values: Vec<Value> = (0..9).map(Value::Integer).collect();
        match DistributionReporter::from_config(&config).report(&values) {
            DistributionMap::Split { k, top, bottom } => {
                assert_eq!(k, config.split_size());
                assert_eq!(top.len(), 2);
                assert_eq!(bottom.len(), 2);
            }
            other => panic!("expected split mode, got {other:?}"),
        }
    }
}
