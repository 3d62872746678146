//! Cell values extracted from Arrow arrays.
//!
//! [`Value`] is the primitive currency of the profiler: every statistic,
//! sample and correspondence record is expressed with it, and it serializes to
//! plain JSON primitives only (numbers, strings, booleans, null).

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};

/// A single cell value.
///
/// Floats are wrapped in [`OrderedFloat`] so values can be hashed and ordered
/// when computing distinct sets and frequency counts. NaN never appears here:
/// extraction maps it to [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// Missing value.
    Null,
    /// Boolean value.
    Boolean(bool),
    /// Integer value (signed or fitting unsigned storage).
    Integer(i64),
    /// Floating point value.
    Float(OrderedFloat<f64>),
    /// Text value.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp without timezone.
    Timestamp(NaiveDateTime),
}

impl Value {
    /// Creates a float value, mapping NaN to null.
    pub fn float(value: f64) -> Self {
        if value.is_nan() {
            Value::Null
        } else {
            Value::Float(OrderedFloat(value))
        }
    }

    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Checks if the value is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Attempts to get the numeric value as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(v.0),
            _ => None,
        }
    }

    /// Compares two numeric values. Integers compare exactly; any other pair
    /// of numbers compares as `f64`. Returns `None` if either side is not
    /// numeric.
    pub fn numeric_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            _ => Some(self.as_f64()?.total_cmp(&other.as_f64()?)),
        }
    }

    /// Renders the value the way it is quoted inside prompt lists: text is
    /// wrapped in single quotes, everything else uses its display form.
    pub fn quoted(&self) -> String {
        match self {
            Value::Text(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::Float(v) => {
                let v = v.0;
                // Keep a visible fractional part so floats never read as integers.
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
                    write!(f, "{v:.1}")
                } else {
                    write!(f, "{v}")
                }
            }
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(v) => serializer.serialize_i64(*v),
            Value::Float(v) if v.0.is_finite() => serializer.serialize_f64(v.0),
            Value::Float(_) => serializer.serialize_none(),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => serializer.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}
