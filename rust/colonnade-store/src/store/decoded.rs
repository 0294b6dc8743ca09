//! An in-memory store of fully decoded columns.

use std::sync::Arc;

use colonnade_common::{Result, error::Error, verify_data};
use colonnade_format::projection::ProjectedField;
use colonnade_format::schema::{BasicType, Schema};
use colonnade_sequence::value::Timestamp96;
use colonnade_sequence::vector::ValueVector;

use crate::read::decoder::ColumnDecoder;
use crate::store::ColumnStore;
use crate::store::decoders::{BinaryDecoder, FixedBinaryDecoder, PrimitiveDecoder};

/// A column store whose data is held fully decoded in memory.
///
/// This is the substrate the projected readers run against: one
/// [`ValueVector`] per schema column, shared read-only between all
/// decoders via `Arc`. Construction performs the cheap structural
/// validation (column count, type agreement, row counts); the value and
/// offset buffers themselves are validated lazily by the decoders, so a
/// malformed column only surfaces an error when (and if) a projection
/// actually decodes it.
pub struct DecodedColumnStore {
    schema: Schema,
    columns: Vec<Arc<ValueVector>>,
    row_count: u64,
}

impl DecodedColumnStore {
    /// Creates a store from one decoded vector per schema column.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count does not match the schema, if
    /// a vector's type disagrees with its field's declared type, or if the
    /// columns disagree on the row count.
    pub fn from_columns(schema: Schema, columns: Vec<ValueVector>) -> Result<DecodedColumnStore> {
        verify_data!(columns, columns.len() == schema.len());
        let row_count = columns.first().map_or(0, |column| column.len()) as u64;
        for (field, column) in schema.fields().iter().zip(columns.iter()) {
            verify_data!(field, column.type_desc == field.type_desc());
            verify_data!(field, column.len() as u64 == row_count);
        }
        log::debug!(
            "opened decoded store: {} columns, {} rows",
            columns.len(),
            row_count
        );
        Ok(DecodedColumnStore {
            schema,
            columns: columns.into_iter().map(Arc::new).collect(),
            row_count,
        })
    }

    fn column(&self, field: &ProjectedField) -> Result<&Arc<ValueVector>> {
        let column = self
            .columns
            .get(field.schema_pos())
            .ok_or_else(|| Error::field_not_found(field.name()))?;
        if column.type_desc != field.type_desc() {
            return Err(Error::invalid_arg(
                "field",
                format!(
                    "projected type of column '{}' disagrees with the stored column",
                    field.name()
                ),
            ));
        }
        Ok(column)
    }
}

impl ColumnStore for DecodedColumnStore {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn row_count(&self) -> u64 {
        self.row_count
    }

    fn create_decoder(&self, field: &ProjectedField) -> Result<Box<dyn ColumnDecoder>> {
        let column = self.column(field)?.clone();
        let name = field.name_arc().clone();
        let decoder: Box<dyn ColumnDecoder> = match field.type_desc().basic_type {
            BasicType::Boolean => Box::new(PrimitiveDecoder::<u8>::new(name, column)),
            BasicType::Int32 => Box::new(PrimitiveDecoder::<i32>::new(name, column)),
            BasicType::Int64 => Box::new(PrimitiveDecoder::<i64>::new(name, column)),
            BasicType::Float32 => Box::new(PrimitiveDecoder::<f32>::new(name, column)),
            BasicType::Float64 => Box::new(PrimitiveDecoder::<f64>::new(name, column)),
            BasicType::Timestamp96 => Box::new(PrimitiveDecoder::<Timestamp96>::new(name, column)),
            BasicType::Binary => Box::new(BinaryDecoder::new(name, column)),
            BasicType::FixedSizeBinary => Box::new(FixedBinaryDecoder::new(name, column)),
            BasicType::Struct => {
                return Err(Error::invalid_arg(
                    "field",
                    "struct fields are materialized by the reader, not decoded from a column",
                ));
            }
        };
        Ok(decoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colonnade_format::schema::{BasicTypeDescriptor, Field};

    fn two_column_schema() -> Schema {
        Schema::new(vec![
            Field::new("a", BasicTypeDescriptor::signed(BasicType::Int32), false),
            Field::new("b", BasicTypeDescriptor::new(BasicType::Binary), true),
        ])
        .unwrap()
    }

    fn int_column(values: &[i32]) -> ValueVector {
        let mut vector = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int32));
        vector.extend_from_slice(values);
        vector
    }

    fn binary_column(values: &[&[u8]]) -> ValueVector {
        let mut vector = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        for value in values {
            vector.push_binary(value);
        }
        vector
    }

    #[test]
    fn test_from_columns() {
        let store = DecodedColumnStore::from_columns(
            two_column_schema(),
            vec![int_column(&[1, 2, 3]), binary_column(&[b"x", b"y", b"z"])],
        )
        .unwrap();
        assert_eq!(store.row_count(), 3);
        assert_eq!(store.schema().len(), 2);
    }

    #[test]
    fn test_column_count_mismatch_rejected() {
        let result =
            DecodedColumnStore::from_columns(two_column_schema(), vec![int_column(&[1, 2, 3])]);
        assert!(result.is_err());
    }

    #[test]
    fn test_row_count_mismatch_rejected() {
        let result = DecodedColumnStore::from_columns(
            two_column_schema(),
            vec![int_column(&[1, 2, 3]), binary_column(&[b"x"])],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let result = DecodedColumnStore::from_columns(
            two_column_schema(),
            vec![binary_column(&[b"x"]), binary_column(&[b"y"])],
        );
        assert!(result.is_err());
    }
}
