//! Row batches: fixed-arity collections of column vectors.

use std::sync::Arc;

use colonnade_common::{Result, verify_arg};
use colonnade_format::projection::ReadProjection;
use colonnade_format::schema::BasicType;

use crate::vector::ColumnVector;

/// A window of rows in columnar form: one [`ColumnVector`] per projected
/// column, all aligned by row index.
///
/// The batch's arity and per-slot vector types are fixed by the reader's
/// projection at construction; only the contents and the row count change
/// across fills.
///
/// # Recycling
///
/// Batches are designed to be passed back into the reader that produced
/// them and refilled in place, avoiding per-batch allocation. A fill
/// invalidates everything observed from the previous fill of the same
/// instance; a batch must be read only between the fill that produced it
/// and the next one. [`RowBatch::generation`] is bumped on every fill so
/// tests can detect stale observation.
pub struct RowBatch {
    projection: Arc<ReadProjection>,
    columns: Vec<Box<dyn ColumnVector>>,
    len: usize,
    generation: u64,
}

impl RowBatch {
    /// Creates a new batch, panicking on a shape mismatch.
    ///
    /// # Panics
    ///
    /// Panics if validation fails (wrong arity, mismatched vector types or
    /// lengths).
    pub fn new(
        projection: Arc<ReadProjection>,
        columns: Vec<Box<dyn ColumnVector>>,
        len: usize,
    ) -> RowBatch {
        RowBatch::try_new(projection, columns, len).expect("RowBatch::try_new")
    }

    /// Creates a new batch, validating its shape against the projection.
    ///
    /// Validates that:
    /// - the column count matches the projection arity (one row-valued
    ///   column for a whole-row projection, one vector per projected field
    ///   otherwise);
    /// - each vector's type matches the projected field's declared type;
    /// - every vector reports exactly `len` entries.
    pub fn try_new(
        projection: Arc<ReadProjection>,
        columns: Vec<Box<dyn ColumnVector>>,
        len: usize,
    ) -> Result<RowBatch> {
        if projection.materializes_rows() {
            verify_arg!(columns, columns.len() == 1);
            verify_arg!(
                columns,
                columns[0].type_desc().basic_type == BasicType::Struct
            );
        } else {
            verify_arg!(columns, columns.len() == projection.len());
            verify_arg!(
                columns,
                projection
                    .fields()
                    .iter()
                    .zip(columns.iter())
                    .all(|(field, column)| field.type_desc() == column.type_desc())
            );
        }
        verify_arg!(columns, columns.iter().all(|column| column.len() == len));
        Ok(RowBatch {
            projection,
            columns,
            len,
            generation: 0,
        })
    }

    /// Returns the projection this batch was shaped by.
    pub fn projection(&self) -> &Arc<ReadProjection> {
        &self.projection
    }

    /// Returns the column vectors in projection order (read-only view).
    pub fn columns(&self) -> &[Box<dyn ColumnVector>] {
        &self.columns
    }

    /// Returns the column vector at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn column(&self, index: usize) -> &dyn ColumnVector {
        self.columns[index].as_ref()
    }

    /// Returns the column vector for the named projected field, if any.
    ///
    /// Always `None` for a whole-row batch, whose single column is not a
    /// named field.
    pub fn column_by_name(&self, name: &str) -> Option<&dyn ColumnVector> {
        if self.projection.materializes_rows() {
            return None;
        }
        self.projection
            .position_of(name)
            .map(|pos| self.columns[pos].as_ref())
    }

    /// Returns the number of rows in the current fill.
    pub fn row_count(&self) -> usize {
        self.len
    }

    /// Returns `true` if the batch holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fill generation, incremented every time the batch is
    /// refilled in place.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new fill: resets all vectors and the row count, bumps the
    /// generation, and hands the vectors to the decode path.
    ///
    /// This is decode-path API; the contents of the batch are unspecified
    /// until the matching [`RowBatch::finish_fill`].
    pub fn begin_fill(&mut self) -> &mut [Box<dyn ColumnVector>] {
        self.len = 0;
        self.generation += 1;
        for column in self.columns.iter_mut() {
            column.reset();
        }
        &mut self.columns
    }

    /// Completes a fill, setting the batch row count.
    ///
    /// # Errors
    ///
    /// Returns an error if any vector does not report exactly `row_count`
    /// entries.
    pub fn finish_fill(&mut self, row_count: usize) -> Result<()> {
        verify_arg!(
            row_count,
            self.columns.iter().all(|column| column.len() == row_count)
        );
        self.len = row_count;
        Ok(())
    }
}

impl std::fmt::Debug for RowBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowBatch")
            .field("arity", &self.columns.len())
            .field("len", &self.len)
            .field("generation", &self.generation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{RowVector, ValueVector};
    use colonnade_format::schema::{BasicTypeDescriptor, Field, Schema};

    fn sample_projection() -> Arc<ReadProjection> {
        let schema = Schema::new(vec![
            Field::new("a", BasicTypeDescriptor::signed(BasicType::Int32), false),
            Field::new("b", BasicTypeDescriptor::new(BasicType::Binary), true),
        ])
        .unwrap();
        Arc::new(ReadProjection::all_columns(schema))
    }

    fn sample_columns(rows: usize) -> Vec<Box<dyn ColumnVector>> {
        let mut a = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int32));
        let mut b = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        for i in 0..rows {
            a.push_value(i as i32);
            b.push_binary(&[b'x'; 3]);
        }
        vec![Box::new(a), Box::new(b)]
    }

    #[test]
    fn test_new_batch() {
        let batch = RowBatch::new(sample_projection(), sample_columns(3), 3);
        assert_eq!(batch.row_count(), 3);
        assert_eq!(batch.columns().len(), 2);
        assert_eq!(batch.generation(), 0);
        let a = batch.column_by_name("a").unwrap().as_value_vector().unwrap();
        assert_eq!(a.as_slice::<i32>(), &[0, 1, 2]);
        assert!(batch.column_by_name("zzz").is_none());
    }

    #[test]
    fn test_mismatched_len_rejected() {
        let result = RowBatch::try_new(sample_projection(), sample_columns(3), 2);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let mut columns = sample_columns(1);
        columns.pop();
        assert!(RowBatch::try_new(sample_projection(), columns, 1).is_err());
    }

    #[test]
    fn test_fill_cycle() {
        let mut batch = RowBatch::new(sample_projection(), sample_columns(2), 2);
        let columns = batch.begin_fill();
        let a = columns[0].as_value_vector_mut().unwrap();
        a.push_value(7i32);
        let b = columns[1].as_value_vector_mut().unwrap();
        b.push_binary(b"q");
        batch.finish_fill(1).unwrap();
        assert_eq!(batch.row_count(), 1);
        assert_eq!(batch.generation(), 1);

        // A row-count that disagrees with the vectors is rejected.
        batch.begin_fill();
        assert!(batch.finish_fill(5).is_err());
    }

    #[test]
    fn test_whole_row_batch() {
        let schema = Schema::new(vec![Field::new(
            "a",
            BasicTypeDescriptor::signed(BasicType::Int32),
            false,
        )])
        .unwrap();
        let projection = Arc::new(ReadProjection::whole_rows(schema));
        let batch = RowBatch::new(projection, vec![Box::new(RowVector::new())], 0);
        assert!(batch.is_empty());
        assert!(batch.column_by_name("a").is_none());
        assert!(batch.column(0).as_row_vector().is_some());
    }
}
