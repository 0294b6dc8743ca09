//! Materialized structured rows.

use std::sync::Arc;

use colonnade_format::projection::ReadProjection;

use crate::value::{Timestamp96, Value};

/// One fully materialized record: a mapping from column name to a
/// dynamically typed [`Value`].
///
/// Rows are the product of the row-wise read mode and of the whole-row
/// ("object") vectorized mode. Every named accessor resolves the column
/// position and matches on the value's type tag per call; that per-field
/// dynamic dispatch is the defining cost of this representation.
///
/// The typed accessors treat a missing column or a type mismatch as a
/// programming-contract violation and panic; use [`Row::try_value`] for a
/// non-panicking lookup.
#[derive(Debug, Clone)]
pub struct Row {
    projection: Arc<ReadProjection>,
    values: Box<[Value]>,
}

impl Row {
    /// Creates a row from the values of each projected column, in
    /// projection order.
    ///
    /// # Panics
    ///
    /// Panics if the value count does not match the projection arity.
    pub fn new(projection: Arc<ReadProjection>, values: Vec<Value>) -> Row {
        assert_eq!(values.len(), projection.len());
        Row {
            projection,
            values: values.into_boxed_slice(),
        }
    }

    /// Returns the projection this row was materialized under.
    pub fn projection(&self) -> &Arc<ReadProjection> {
        &self.projection
    }

    /// Returns the number of fields in the row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at the given projected position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    /// Returns the value of the named column, if the column is part of the
    /// row's projection.
    pub fn try_value(&self, name: &str) -> Option<&Value> {
        self.projection
            .position_of(name)
            .map(|pos| &self.values[pos])
    }

    /// Returns the value of the named column.
    ///
    /// # Panics
    ///
    /// Panics if the column is not part of the row's projection.
    pub fn value(&self, name: &str) -> &Value {
        self.try_value(name)
            .unwrap_or_else(|| panic!("column '{name}' is not part of the row projection"))
    }

    /// Returns `true` if the named column's value is null.
    pub fn is_null(&self, name: &str) -> bool {
        self.value(name).is_null()
    }

    /// Returns the named column as a boolean.
    pub fn bool_value(&self, name: &str) -> bool {
        match self.value(name) {
            Value::Boolean(v) => *v,
            other => Self::mismatch(name, "Boolean", other),
        }
    }

    /// Returns the named column as a 32-bit integer.
    pub fn i32_value(&self, name: &str) -> i32 {
        match self.value(name) {
            Value::Int32(v) => *v,
            other => Self::mismatch(name, "Int32", other),
        }
    }

    /// Returns the named column as a 64-bit integer.
    pub fn i64_value(&self, name: &str) -> i64 {
        match self.value(name) {
            Value::Int64(v) => *v,
            other => Self::mismatch(name, "Int64", other),
        }
    }

    /// Returns the named column as a 32-bit float.
    pub fn f32_value(&self, name: &str) -> f32 {
        match self.value(name) {
            Value::Float32(v) => *v,
            other => Self::mismatch(name, "Float32", other),
        }
    }

    /// Returns the named column as a 64-bit float.
    pub fn f64_value(&self, name: &str) -> f64 {
        match self.value(name) {
            Value::Float64(v) => *v,
            other => Self::mismatch(name, "Float64", other),
        }
    }

    /// Returns the named column as a byte slice. Accepts both
    /// variable-length and fixed-length binary values.
    pub fn binary_value(&self, name: &str) -> &[u8] {
        match self.value(name) {
            Value::Binary(v) | Value::FixedBinary(v) => v,
            other => Self::mismatch(name, "Binary", other),
        }
    }

    /// Returns the named column as a 96-bit timestamp.
    pub fn timestamp96_value(&self, name: &str) -> Timestamp96 {
        match self.value(name) {
            Value::Timestamp96(v) => *v,
            other => Self::mismatch(name, "Timestamp96", other),
        }
    }

    #[cold]
    fn mismatch(name: &str, expected: &str, actual: &Value) -> ! {
        panic!(
            "column '{name}': expected a {expected} value, found {}",
            actual.kind_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colonnade_format::schema::{BasicType, BasicTypeDescriptor, Field, Schema};

    fn sample_row() -> Row {
        let schema = Schema::new(vec![
            Field::new("id", BasicTypeDescriptor::signed(BasicType::Int32), false),
            Field::new("name", BasicTypeDescriptor::new(BasicType::Binary), true),
        ])
        .unwrap();
        let projection = Arc::new(ReadProjection::all_columns(schema));
        Row::new(
            projection,
            vec![Value::Int32(7), Value::Binary(b"seven".to_vec().into())],
        )
    }

    #[test]
    fn test_typed_access() {
        let row = sample_row();
        assert_eq!(row.len(), 2);
        assert_eq!(row.i32_value("id"), 7);
        assert_eq!(row.binary_value("name"), b"seven");
        assert!(!row.is_null("name"));
        assert_eq!(row.value_at(0), &Value::Int32(7));
    }

    #[test]
    fn test_try_value() {
        let row = sample_row();
        assert!(row.try_value("id").is_some());
        assert!(row.try_value("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "not part of the row projection")]
    fn test_unknown_column_panics() {
        sample_row().value("missing");
    }

    #[test]
    #[should_panic(expected = "expected a Int64 value")]
    fn test_type_mismatch_panics() {
        sample_row().i64_value("id");
    }
}
