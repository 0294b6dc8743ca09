//! Row-wise cursor.

use std::sync::Arc;

use colonnade_common::{Result, try_or_ret_some_err};
use colonnade_format::projection::ReadProjection;
use colonnade_sequence::row::Row;

use crate::read::ReaderState;
use crate::read::decoder::FieldCursor;

/// A cursor yielding one materialized [`Row`] per call.
///
/// Each call decodes exactly one logical position across all projected
/// columns and assembles a fresh row, resolving every field's type tag
/// dynamically. This costs one allocation and one per-field dispatch per
/// row; it is the baseline the vectorized path is measured against.
pub struct RowReader {
    projection: Arc<ReadProjection>,
    cursors: Vec<FieldCursor>,
    next_pos: u64,
    row_count: u64,
    state: ReaderState,
}

impl RowReader {
    pub(crate) fn new(
        projection: Arc<ReadProjection>,
        cursors: Vec<FieldCursor>,
        row_count: u64,
    ) -> RowReader {
        RowReader {
            projection,
            cursors,
            next_pos: 0,
            row_count,
            state: ReaderState::Active,
        }
    }

    /// Returns the projection this reader materializes.
    pub fn projection(&self) -> &Arc<ReadProjection> {
        &self.projection
    }

    /// Reads the next row, or `None` at end of stream.
    ///
    /// After `None` has been returned once, every subsequent call returns
    /// `None` as well.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader is closed or failed, or if a column
    /// fails to decode. A decode error leaves the reader in the failed
    /// state.
    pub fn read_row(&mut self) -> Result<Option<Row>> {
        if !self.state.check_readable("read_row")? {
            return Ok(None);
        }
        if self.next_pos >= self.row_count {
            self.state = ReaderState::Exhausted;
            return Ok(None);
        }

        let pos_range = self.next_pos..self.next_pos + 1;
        let mut values = Vec::with_capacity(self.cursors.len());
        for cursor in self.cursors.iter_mut() {
            match cursor.decode(pos_range.clone()) {
                Ok(scratch) => values.push(scratch.value(0)),
                Err(err) => {
                    self.state = ReaderState::Failed;
                    return Err(err);
                }
            }
        }
        self.next_pos += 1;
        Ok(Some(Row::new(self.projection.clone(), values)))
    }

    /// Returns an iterator adapter over the remaining rows.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows { reader: self }
    }

    /// Closes the reader, releasing its decoders.
    ///
    /// Closing an already-closed reader is a no-op. Any later read fails.
    pub fn close(&mut self) {
        if self.state != ReaderState::Closed {
            log::debug!("closing row reader at position {}", self.next_pos);
            self.cursors.clear();
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
}

/// Iterator over the rows remaining in a [`RowReader`].
pub struct Rows<'a> {
    reader: &'a mut RowReader,
}

impl Iterator for Rows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Result<Row>> {
        let row = try_or_ret_some_err!(self.reader.read_row());
        row.map(Ok)
    }
}
