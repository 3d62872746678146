//! Read-only table snapshots backed by Arrow record batches.
//!
//! A [`Table`] is the unit every profiling and annotation call works on. It is
//! immutable once built, so one instance can be shared (for example behind an
//! `Arc`) by concurrent callers.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use sql_brief::table::Table;
//!
//! let table = Table::from_columns(
//!     "users",
//!     vec![
//!         ("id", Arc::new(Int64Array::from(vec![1, 2, 3])) as ArrayRef),
//!         ("name", Arc::new(StringArray::from(vec![Some("a"), None, Some("a")])) as ArrayRef),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(table.row_count(), 3);
//! assert_eq!(table.column_names(), vec!["id", "name"]);
//! let name = table.column_by_name("name").unwrap();
//! assert_eq!(name.null_count(), 1);
//! assert_eq!(name.distinct_values().len(), 1);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Decimal128Type, Field, Float16Type, Float32Type,
    Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, Schema, SchemaRef, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;

use crate::analyzers::classifier::{NumericKind, SemanticType, TypeClassifier};
use crate::error::{BriefError, BriefResult};
use crate::types::Value;

/// An immutable, named table snapshot.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    batch: RecordBatch,
}

impl Table {
    /// Creates a table from a single record batch.
    ///
    /// Column names must be unique.
    pub fn try_new(name: impl Into<String>, batch: RecordBatch) -> BriefResult<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for field in batch.schema().fields() {
            if !seen.insert(field.name().clone()) {
                return Err(BriefError::DuplicateColumn {
                    table: name,
                    column: field.name().clone(),
                });
            }
        }
        Ok(Self { name, batch })
    }

    /// Creates a table from several batches sharing one schema.
    pub fn from_batches(
        name: impl Into<String>,
        schema: SchemaRef,
        batches: &[RecordBatch],
    ) -> BriefResult<Self> {
        let batch = concat_batches(&schema, batches)?;
        Self::try_new(name, batch)
    }

    /// Creates a table from named arrays. Fields are declared nullable.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(&str, ArrayRef)>,
    ) -> BriefResult<Self> {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(column, array)| Field::new(*column, array.data_type().clone(), true))
            .collect();
        let arrays = columns.into_iter().map(|(_, array)| array).collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
        Self::try_new(name, batch)
    }

    /// Returns a copy of this table with every column renamed by `rename`.
    pub fn rename_columns(&self, rename: impl Fn(&str) -> String) -> BriefResult<Self> {
        let fields: Vec<Field> = self
            .batch
            .schema()
            .fields()
            .iter()
            .map(|field| field.as_ref().clone().with_name(rename(field.name())))
            .collect();
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(fields)),
            self.batch.columns().to_vec(),
        )?;
        Self::try_new(self.name.clone(), batch)
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Arrow schema of the table.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// Underlying record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    /// Returns the column at `index`, if any.
    pub fn column(&self, index: usize) -> Option<Column<'_>> {
        let field = self.batch.schema_ref().fields().get(index)?;
        Some(Column {
            index,
            field: field.as_ref(),
            array: self.batch.column(index),
        })
    }

    /// Looks up a column by name.
    pub fn column_by_name(&self, name: &str) -> BriefResult<Column<'_>> {
        let index = self
            .batch
            .schema_ref()
            .index_of(name)
            .map_err(|_| BriefError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })?;
        self.column(index).ok_or_else(|| BriefError::ColumnNotFound {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Iterates over the columns in table order.
    pub fn columns(&self) -> impl Iterator<Item = Column<'_>> + '_ {
        (0..self.num_columns()).filter_map(move |i| self.column(i))
    }
}

/// A borrowed view of one column of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    index: usize,
    field: &'a Field,
    array: &'a ArrayRef,
}

impl<'a> Column<'a> {
    /// Position of the column within its table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Column name.
    pub fn name(&self) -> &'a str {
        self.field.name()
    }

    /// Declared Arrow storage type.
    pub fn data_type(&self) -> &'a DataType {
        self.field.data_type()
    }

    /// Raw Arrow array.
    pub fn array(&self) -> &'a ArrayRef {
        self.array
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.array.len()
    }

    /// Checks if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }

    /// Semantic category of the column.
    pub fn semantic_type(&self) -> SemanticType {
        TypeClassifier::classify_column(self)
    }

    /// Integer vs floating subtype for numeric columns.
    pub fn numeric_kind(&self) -> Option<NumericKind> {
        TypeClassifier::numeric_kind(self.data_type())
    }

    /// Value at `row`. Nulls and float NaN both read as [`Value::Null`].
    pub fn value(&self, row: usize) -> Value {
        value_at(self.array.as_ref(), row)
    }

    /// All values in row order, nulls included.
    pub fn values(&self) -> Vec<Value> {
        (0..self.len()).map(|row| self.value(row)).collect()
    }

    /// Number of missing entries.
    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&row| self.value(row).is_null()).count()
    }

    /// Whether any missing entry was observed.
    pub fn is_nullable(&self) -> bool {
        self.null_count() > 0
    }

    /// Distinct non-null values in first-seen order.
    pub fn distinct_values(&self) -> Vec<Value> {
        distinct_non_null(&self.values())
    }

    /// Declared labels of a dictionary-encoded column, in dictionary order.
    ///
    /// Labels that never occur in the data are included.
    pub fn categories(&self) -> Option<Vec<Value>> {
        match self.data_type() {
            DataType::Dictionary(_, _) => {
                let labels = self.array.as_any_dictionary().values();
                Some(
                    (0..labels.len())
                        .map(|i| value_at(labels.as_ref(), i))
                        .collect(),
                )
            }
            _ => None,
        }
    }
}

/// Distinct non-null values of `values`, in first-seen order.
pub(crate) fn distinct_non_null(values: &[Value]) -> Vec<Value> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| !v.is_null() && seen.insert(*v))
        .cloned()
        .collect()
}

/// Reads a single cell of any supported Arrow array as a [`Value`].
fn value_at(array: &dyn Array, row: usize) -> Value {
    if array.is_null(row) {
        return Value::Null;
    }

    match array.data_type() {
        DataType::Boolean => Value::Boolean(array.as_boolean().value(row)),
        DataType::Int8 => Value::Integer(array.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Value::Integer(array.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Value::Integer(array.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Value::Integer(array.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => Value::Integer(array.as_primitive::<UInt8Type>().value(row) as i64),
        DataType::UInt16 => Value::Integer(array.as_primitive::<UInt16Type>().value(row) as i64),
        DataType::UInt32 => Value::Integer(array.as_primitive::<UInt32Type>().value(row) as i64),
        DataType::UInt64 => {
            let v = array.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v)
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::float(v as f64))
        }
        DataType::Float16 => Value::float(array.as_primitive::<Float16Type>().value(row).to_f64()),
        DataType::Float32 => Value::float(array.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Value::float(array.as_primitive::<Float64Type>().value(row)),
        DataType::Decimal128(_, scale) => {
            let raw = array.as_primitive::<Decimal128Type>().value(row);
            Value::float(raw as f64 / 10f64.powi(*scale as i32))
        }
        DataType::Decimal256(_, _) => array_value_to_string(array, row)
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .map_or(Value::Null, Value::float),
        DataType::Utf8 => Value::text(array.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Value::text(array.as_string::<i64>().value(row)),
        DataType::Utf8View => Value::text(array.as_string_view().value(row)),
        DataType::Date32 => array
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map_or(Value::Null, Value::Date),
        DataType::Date64 => array
            .as_primitive::<Date64Type>()
            .value_as_date(row)
            .map_or(Value::Null, Value::Date),
        DataType::Timestamp(unit, _) => {
            let ts = match unit {
                TimeUnit::Second => array
                    .as_primitive::<TimestampSecondType>()
                    .value_as_datetime(row),
                TimeUnit::Millisecond => array
                    .as_primitive::<TimestampMillisecondType>()
                    .value_as_datetime(row),
                TimeUnit::Microsecond => array
                    .as_primitive::<TimestampMicrosecondType>()
                    .value_as_datetime(row),
                TimeUnit::Nanosecond => array
                    .as_primitive::<TimestampNanosecondType>()
                    .value_as_datetime(row),
            };
            ts.map_or(Value::Null, Value::Timestamp)
        }
        DataType::Dictionary(_, _) => {
            let dictionary = array.as_any_dictionary();
            match value_at(dictionary.keys(), row) {
                Value::Integer(key) if key >= 0 && (key as usize) < dictionary.values().len() => {
                    value_at(dictionary.values().as_ref(), key as usize)
                }
                _ => Value::Null,
            }
        }
        _ => array_value_to_string(array, row)
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}
