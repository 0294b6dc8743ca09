//! Vectorized batch cursor.

use std::sync::Arc;

use colonnade_common::{Result, verify_arg};
use colonnade_format::projection::ReadProjection;
use colonnade_sequence::batch::RowBatch;
use colonnade_sequence::vector::{ColumnVector, RowVector, ValueVector};

use crate::read::ReaderState;
use crate::read::decoder::ColumnDecoder;

/// A cursor producing [`RowBatch`]es of up to a fixed capacity of rows per
/// call.
///
/// The reader owns one type-specialized [`ColumnDecoder`] per projected
/// column (or a single row-materializing decoder in whole-row mode),
/// created at construction. Each [`next_batch`](Self::next_batch) call
/// costs one virtual dispatch per column; the per-value work inside a
/// decoder is a monomorphic loop.
pub struct BatchReader {
    projection: Arc<ReadProjection>,
    decoders: Vec<Box<dyn ColumnDecoder>>,
    batch_capacity: usize,
    next_pos: u64,
    row_count: u64,
    state: ReaderState,
}

impl BatchReader {
    pub(crate) fn new(
        projection: Arc<ReadProjection>,
        decoders: Vec<Box<dyn ColumnDecoder>>,
        batch_capacity: usize,
        row_count: u64,
    ) -> BatchReader {
        BatchReader {
            projection,
            decoders,
            batch_capacity,
            next_pos: 0,
            row_count,
            state: ReaderState::Active,
        }
    }

    /// Returns the projection this reader materializes.
    pub fn projection(&self) -> &Arc<ReadProjection> {
        &self.projection
    }

    /// Returns the configured number of rows per batch.
    pub fn batch_capacity(&self) -> usize {
        self.batch_capacity
    }

    /// Fills and returns the next batch, or `None` at end of stream.
    ///
    /// With `None` as input, a new batch is allocated, sized to the batch
    /// capacity with one vector per projected column. With `Some(batch)`,
    /// the supplied batch — which must be one previously returned by this
    /// reader — is overwritten in place and handed back, so a whole scan
    /// allocates exactly one batch. Every fill invalidates whatever was
    /// observed from the previous fill of that instance.
    ///
    /// The returned batch reports the number of rows actually decoded,
    /// which is less than the capacity only on the final batch. After
    /// `None` has been returned once, every subsequent call returns `None`
    /// as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader is closed or failed, if the supplied
    /// batch does not belong to this reader, or if a column fails to
    /// decode. A decode error leaves the reader in the failed state.
    pub fn next_batch(&mut self, previous: Option<RowBatch>) -> Result<Option<RowBatch>> {
        if !self.state.check_readable("next_batch")? {
            return Ok(None);
        }
        if self.next_pos >= self.row_count {
            self.state = ReaderState::Exhausted;
            return Ok(None);
        }

        let mut batch = match previous {
            Some(batch) => {
                verify_arg!(
                    previous,
                    Arc::ptr_eq(batch.projection(), &self.projection)
                );
                batch
            }
            None => self.allocate_batch(),
        };

        let rows = (self.row_count - self.next_pos).min(self.batch_capacity as u64);
        let pos_range = self.next_pos..self.next_pos + rows;
        let columns = batch.begin_fill();
        for (decoder, column) in self.decoders.iter_mut().zip(columns.iter_mut()) {
            if let Err(err) = decoder.fill(column.as_mut(), pos_range.clone()) {
                self.state = ReaderState::Failed;
                return Err(err);
            }
        }
        if let Err(err) = batch.finish_fill(rows as usize) {
            self.state = ReaderState::Failed;
            return Err(err);
        }
        self.next_pos = pos_range.end;
        Ok(Some(batch))
    }

    /// Closes the reader, releasing its decoders.
    ///
    /// Closing an already-closed reader is a no-op. Any later read fails.
    pub fn close(&mut self) {
        if self.state != ReaderState::Closed {
            log::debug!("closing batch reader at position {}", self.next_pos);
            self.decoders.clear();
            self.state = ReaderState::Closed;
        }
    }

    /// Returns `true` if the reader has reported end of stream.
    pub fn is_exhausted(&self) -> bool {
        self.state == ReaderState::Exhausted
    }

    /// Returns `true` if the reader has been closed.
    pub fn is_closed(&self) -> bool {
        self.state == ReaderState::Closed
    }

    fn allocate_batch(&self) -> RowBatch {
        let columns: Vec<Box<dyn ColumnVector>> = if self.projection.materializes_rows() {
            vec![Box::new(RowVector::with_capacity(self.batch_capacity))]
        } else {
            self.projection
                .fields()
                .iter()
                .map(|field| {
                    Box::new(ValueVector::with_capacity(
                        field.type_desc(),
                        self.batch_capacity,
                    )) as Box<dyn ColumnVector>
                })
                .collect()
        };
        RowBatch::new(self.projection.clone(), columns, 0)
    }
}
