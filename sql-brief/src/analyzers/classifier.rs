//! Semantic type classification for columns.
//!
//! The classifier maps a column's declared storage type onto one of four
//! semantic categories that decide which profiling branches run:
//!
//! - **numeric**: integer, unsigned, floating point and decimal storage
//! - **datetime**: dates and timestamps
//! - **categorical**: dictionary-encoded columns, whose dictionary is the
//!   declared finite label set
//! - **generic**: everything else, treated as text
//!
//! Unknown storage types are never an error; they fall through to generic.
//!
//! # Example
//!
//! ```rust
//! use arrow::datatypes::DataType;
//! use sql_brief::analyzers::classifier::{NumericKind, SemanticType, TypeClassifier};
//!
//! assert_eq!(TypeClassifier::classify_storage(&DataType::Int32), SemanticType::Numeric);
//! assert_eq!(TypeClassifier::numeric_kind(&DataType::Float64), Some(NumericKind::Floating));
//! assert_eq!(SemanticType::from_declared("VARCHAR(20)"), SemanticType::Generic);
//! assert_eq!(SemanticType::from_declared("DOUBLE PRECISION"), SemanticType::Numeric);
//! ```

use std::fmt;

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

use crate::table::Column;
use crate::types::Value;

/// Semantic category of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Integer or floating point measurements
    Numeric,
    /// Dates and timestamps
    Datetime,
    /// Values drawn from a declared, finite label set
    Categorical,
    /// Free text and anything unrecognized
    Generic,
}

impl SemanticType {
    /// Lowercase tag used in profiles.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Numeric => "numeric",
            SemanticType::Datetime => "datetime",
            SemanticType::Categorical => "categorical",
            SemanticType::Generic => "generic",
        }
    }

    /// Checks if the type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Numeric)
    }

    /// Classifies a SQL-declared column type using SQLite affinity rules.
    ///
    /// Used when only DDL text is available for a column.
    pub fn from_declared(declared: &str) -> Self {
        let upper = declared.trim().to_ascii_uppercase();
        if upper.contains("INT") {
            SemanticType::Numeric
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            SemanticType::Generic
        } else if upper.contains("BLOB") || upper.is_empty() {
            SemanticType::Generic
        } else if upper.contains("REAL") || upper.contains("FLOA") || upper.contains("DOUB") {
            SemanticType::Numeric
        } else if upper.contains("DATE") || upper.contains("TIME") {
            SemanticType::Datetime
        } else if upper.contains("NUM") || upper.contains("DEC") {
            SemanticType::Numeric
        } else {
            SemanticType::Generic
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage subtype of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Integer,
    Floating,
}

impl NumericKind {
    /// Casts a computed statistic to this subtype.
    ///
    /// Integer columns report integers truncated toward zero; floating
    /// columns report floats. Non-finite input becomes null.
    pub fn cast(&self, value: f64) -> Value {
        if !value.is_finite() {
            return Value::Null;
        }
        match self {
            NumericKind::Integer => Value::Integer(value.trunc() as i64),
            NumericKind::Floating => Value::float(value),
        }
    }

    /// Casts an observed value to this subtype, keeping integers exact.
    pub fn cast_value(&self, value: &Value) -> Value {
        match (self, value) {
            (NumericKind::Integer, Value::Integer(v)) => Value::Integer(*v),
            _ => value.as_f64().map_or(Value::Null, |v| self.cast(v)),
        }
    }
}

/// Stateless classifier from storage types to semantic types.
pub struct TypeClassifier;

impl TypeClassifier {
    /// Classifies a column from its storage type and observed values.
    pub fn classify_column(column: &Column<'_>) -> SemanticType {
        match column.data_type() {
            // Nothing was ever observed, so there is no type to speak of.
            DataType::Null => SemanticType::Generic,
            data_type => Self::classify_storage(data_type),
        }
    }

    /// Classifies an Arrow storage type.
    pub fn classify_storage(data_type: &DataType) -> SemanticType {
        if Self::numeric_kind(data_type).is_some() {
            return SemanticType::Numeric;
        }
        match data_type {
            DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
                SemanticType::Datetime
            }
            DataType::Dictionary(_, _) => SemanticType::Categorical,
            _ => SemanticType::Generic,
        }
    }

    /// Numeric subtype of a storage type, if it is numeric.
    pub fn numeric_kind(data_type: &DataType) -> Option<NumericKind> {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Some(NumericKind::Integer),
            DataType::Float16
            | DataType::Float32
            | DataType::Float64
            | DataType::Decimal128(_, _)
            | DataType::Decimal256(_, _) => Some(NumericKind::Floating),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn test_storage_classification() {
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::UInt16),
            SemanticType::Numeric
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Decimal128(10, 2)),
            SemanticType::Numeric
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Timestamp(TimeUnit::Millisecond, None)),
            SemanticType::Datetime
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Date32),
            SemanticType::Datetime
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Dictionary(
                Box::new(DataType::Int8),
                Box::new(DataType::Utf8)
            )),
            SemanticType::Categorical
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Utf8),
            SemanticType::Generic
        );
    }

    #[test]
    fn test_unrecognized_types_fall_through_to_generic() {
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Boolean),
            SemanticType::Generic
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Binary),
            SemanticType::Generic
        );
        assert_eq!(
            TypeClassifier::classify_storage(&DataType::Null),
            SemanticType::Generic
        );
    }

    #[test]
    fn test_numeric_kind_cast() {
        assert_eq!(NumericKind::Integer.cast(5.9), Value::Integer(5));
        assert_eq!(NumericKind::Integer.cast(-5.9), Value::Integer(-5));
        assert_eq!(NumericKind::Floating.cast(5.9), Value::float(5.9));
        assert_eq!(NumericKind::Floating.cast(f64::NAN), Value::Null);
    }

    #[test]
    fn test_declared_affinity() {
        assert_eq!(SemanticType::from_declared("INTEGER"), SemanticType::Numeric);
        assert_eq!(SemanticType::from_declared("bigint"), SemanticType::Numeric);
        assert_eq!(SemanticType::from_declared("REAL"), SemanticType::Numeric);
        assert_eq!(SemanticType::from_declared("NUMERIC(10,2)"), SemanticType::Numeric);
        assert_eq!(SemanticType::from_declared("TEXT"), SemanticType::Generic);
        assert_eq!(SemanticType::from_declared("TIMESTAMP"), SemanticType::Datetime);
        assert_eq!(SemanticType::from_declared("DATE"), SemanticType::Datetime);
        assert_eq!(SemanticType::from_declared(""), SemanticType::Generic);
        assert_eq!(SemanticType::from_declared("BOOLEAN"), SemanticType::Generic);
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&SemanticType::Categorical).unwrap();
        assert_eq!(json, "\"categorical\"");
        assert_eq!(SemanticType::Numeric.to_string(), "numeric");
    }
}
