//! Cross-column correspondence between non-numeric values and numeric extremes.
//!
//! For a non-numeric column `C` and every numeric column `N` of the same
//! table, the analyzer records which value of `C` sits on the row where `N`
//! reaches its maximum, and which sits on the row where `N` reaches its
//! minimum. Extremes are located once per table ([`numeric_extremes`]) and
//! reused for every non-numeric column.
//!
//! Rows are chosen by first occurrence. A numeric column whose maximum and
//! minimum fall on the same row carries no information and is left out.

use std::cmp::Ordering;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::table::Table;
use crate::types::Value;

/// Location of the extremes of one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericExtreme {
    /// Position of the numeric column in its table
    pub column_index: usize,
    /// Name of the numeric column
    pub column_name: String,
    /// First row holding the maximum
    pub max_row: usize,
    /// First row holding the minimum
    pub min_row: usize,
    /// The maximum value
    pub max_value: Value,
    /// The minimum value
    pub min_value: Value,
}

impl NumericExtreme {
    /// Whether maximum and minimum sit on the same row.
    pub fn is_degenerate(&self) -> bool {
        self.max_row == self.min_row
    }
}

/// Locates the extremes of every numeric column of `table`, in table order.
///
/// Columns without any non-null value are skipped.
pub fn numeric_extremes(table: &Table) -> Vec<NumericExtreme> {
    table
        .columns()
        .filter(|column| column.semantic_type().is_numeric())
        .filter_map(|column| {
            let values = column.values();
            let (max_row, min_row) = extreme_rows(&values)?;
            Some(NumericExtreme {
                column_index: column.index(),
                column_name: column.name().to_string(),
                max_row,
                min_row,
                max_value: values[max_row].clone(),
                min_value: values[min_row].clone(),
            })
        })
        .collect()
}

/// First rows of the maximum and minimum, ignoring missing values.
fn extreme_rows(values: &[Value]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (row, value) in values.iter().enumerate() {
        if value.as_f64().is_none() {
            continue;
        }
        best = Some(match best {
            None => (row, row),
            Some((max_row, min_row)) => {
                let max_row = match value.numeric_cmp(&values[max_row]) {
                    Some(Ordering::Greater) => row,
                    _ => max_row,
                };
                let min_row = match value.numeric_cmp(&values[min_row]) {
                    Some(Ordering::Less) => row,
                    _ => min_row,
                };
                (max_row, min_row)
            }
        });
    }
    best
}

/// The value of a non-numeric column on an extreme row.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeMatch {
    /// Value of the profiled column on that row (may be null)
    pub value: Value,
    /// The numeric extreme itself
    pub extreme: Value,
}

/// Correspondence of one profiled column against one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondence {
    /// Name of the numeric column
    pub numeric_column: String,
    /// Match on the row of the maximum
    pub at_max: ExtremeMatch,
    /// Match on the row of the minimum
    pub at_min: ExtremeMatch,
}

/// Ordered correspondences of a non-numeric column, one per informative
/// numeric column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrespondenceMap {
    entries: Vec<Correspondence>,
}

impl CorrespondenceMap {
    /// Entries in numeric-column table order.
    pub fn entries(&self) -> &[Correspondence] {
        &self.entries
    }

    /// Looks up the entry for a numeric column.
    pub fn get(&self, numeric_column: &str) -> Option<&Correspondence> {
        self.entries
            .iter()
            .find(|c| c.numeric_column == numeric_column)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no numeric column contributed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct ExtremeRecords<'a> {
    map: &'a CorrespondenceMap,
    maximum: bool,
}

impl Serialize for ExtremeRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.map.len()))?;
        for entry in &self.map.entries {
            let (record, key) = if self.maximum {
                (&entry.at_max, "max_value")
            } else {
                (&entry.at_min, "min_value")
            };
            map.serialize_entry(&entry.numeric_column, &ExtremeRecord { record, key })?;
        }
        map.end()
    }
}

struct ExtremeRecord<'a> {
    record: &'a ExtremeMatch,
    key: &'static str,
}

impl Serialize for ExtremeRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("value", &self.record.value)?;
        map.serialize_entry(self.key, &self.record.extreme)?;
        map.end()
    }
}

/// Serializes as `{"corresponding_to_max": {...}, "corresponding_to_min": {...}}`.
impl Serialize for CorrespondenceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(
            "corresponding_to_max",
            &ExtremeRecords {
                map: self,
                maximum: true,
            },
        )?;
        map.serialize_entry(
            "corresponding_to_min",
            &ExtremeRecords {
                map: self,
                maximum: false,
            },
        )?;
        map.end()
    }
}

/// Links a non-numeric column's values to numeric extremes.
pub struct CorrespondenceAnalyzer;

impl CorrespondenceAnalyzer {
    /// Builds the correspondence map of the column at `column_index`, whose
    /// row values are `values`, against precomputed `extremes`.
    pub fn analyze(
        column_index: usize,
        values: &[Value],
        extremes: &[NumericExtreme],
    ) -> CorrespondenceMap {
        let entries = extremes
            .iter()
            .filter(|extreme| extreme.column_index != column_index && !extreme.is_degenerate())
            .map(|extreme| Correspondence {
                numeric_column: extreme.column_name.clone(),
                at_max: ExtremeMatch {
                    value: values.get(extreme.max_row).cloned().unwrap_or(Value::Null),
                    extreme: extreme.max_value.clone(),
                },
                at_min: ExtremeMatch {
                    value: values.get(extreme.min_row).cloned().unwrap_or(Value::Null),
                    extreme: extreme.min_value.clone(),
                },
            })
            .collect();
        CorrespondenceMap { entries }
    }
}
