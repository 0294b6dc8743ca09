//! The column decoder seam and row materialization.

use std::ops::Range;
use std::sync::Arc;

use colonnade_common::{Result, error::Error};
use colonnade_format::projection::ReadProjection;
use colonnade_sequence::row::Row;
use colonnade_sequence::vector::{ColumnVector, ValueVector};

/// Decodes one column's values into a caller-owned vector.
///
/// A decoder is created once per projected column at reader construction,
/// specialized to the column's declared type. Each [`fill`](Self::fill)
/// call is one virtual dispatch; the loop inside an implementation is
/// monomorphic to the column type. Filling appends into `dst`, so the
/// recycled-batch path can reuse vector allocations across calls.
///
/// Decoders are stateless with respect to position: the reader owns the
/// cursor and passes an explicit position range to every call.
pub trait ColumnDecoder: Send + Sync + 'static {
    /// Appends the decoded values of `pos_range` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds for the column, if
    /// `dst` is not the vector shape this decoder fills, or if the
    /// underlying column data is malformed or truncated. A decode error is
    /// fatal to the reader driving this decoder.
    fn fill(&mut self, dst: &mut dyn ColumnVector, pos_range: Range<u64>) -> Result<()>;
}

/// A decoder paired with its own scratch vector.
///
/// Used wherever decoded values are consumed value-wise rather than as
/// whole vectors: the row-wise reader keeps one single-slot cursor per
/// projected column, and [`RowMaterializer`] keeps one batch-sized cursor
/// per schema column.
pub struct FieldCursor {
    decoder: Box<dyn ColumnDecoder>,
    scratch: ValueVector,
}

impl FieldCursor {
    /// Creates a cursor from a decoder and the scratch vector it fills.
    pub fn new(decoder: Box<dyn ColumnDecoder>, scratch: ValueVector) -> FieldCursor {
        FieldCursor { decoder, scratch }
    }

    /// Decodes `pos_range` into the scratch vector, replacing its previous
    /// contents.
    pub fn decode(&mut self, pos_range: Range<u64>) -> Result<&ValueVector> {
        self.scratch.reset();
        self.decoder.fill(&mut self.scratch, pos_range)?;
        Ok(&self.scratch)
    }

    /// Returns the scratch vector holding the most recently decoded range.
    pub fn scratch(&self) -> &ValueVector {
        &self.scratch
    }
}

/// A [`ColumnDecoder`] that materializes whole structured rows.
///
/// Backs the whole-row ("object") batch mode: per fill, every underlying
/// column is decoded into its scratch vector, then one [`Row`] per
/// position is assembled through the per-value dynamic accessors. This is
/// deliberately the expensive baseline the typed vector path is measured
/// against.
pub struct RowMaterializer {
    projection: Arc<ReadProjection>,
    cursors: Vec<FieldCursor>,
}

impl RowMaterializer {
    /// Creates a materializer over one cursor per projected field.
    ///
    /// # Panics
    ///
    /// Panics if the cursor count does not match the projection arity.
    pub fn new(projection: Arc<ReadProjection>, cursors: Vec<FieldCursor>) -> RowMaterializer {
        assert_eq!(cursors.len(), projection.len());
        RowMaterializer {
            projection,
            cursors,
        }
    }
}

impl ColumnDecoder for RowMaterializer {
    fn fill(&mut self, dst: &mut dyn ColumnVector, pos_range: Range<u64>) -> Result<()> {
        let len = pos_range.end.saturating_sub(pos_range.start) as usize;
        for cursor in self.cursors.iter_mut() {
            cursor.decode(pos_range.clone())?;
        }
        let rows = dst
            .as_row_vector_mut()
            .ok_or_else(|| Error::invalid_arg("dst", "expected a row vector"))?;
        for i in 0..len {
            let values = self
                .cursors
                .iter()
                .map(|cursor| cursor.scratch().value(i))
                .collect();
            rows.push_row(Row::new(self.projection.clone(), values));
        }
        Ok(())
    }
}
