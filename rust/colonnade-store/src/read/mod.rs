//! Projected readers over a column store.
//!
//! A reader is built once per scan, against one store and one immutable
//! [`ReadProjection`], and is driven by a single thread. Exactly one read
//! mode is exercised per reader instance: [`RowReader`] yields one
//! structured row per call, [`BatchReader`] fills a recycled batch of
//! column vectors per call.

use std::sync::Arc;

use colonnade_common::{Result, error::Error};
use colonnade_format::projection::ReadProjection;
use colonnade_sequence::vector::ValueVector;

use crate::read::batch_reader::BatchReader;
use crate::read::decoder::{ColumnDecoder, FieldCursor, RowMaterializer};
use crate::read::row_reader::RowReader;
use crate::store::ColumnStore;

pub mod batch_reader;
pub mod decoder;
pub mod row_reader;

/// Default number of rows per vectorized batch.
pub const DEFAULT_BATCH_CAPACITY: usize = 1024;

/// Lifecycle state shared by both reader kinds.
///
/// A reader starts `Active`, becomes `Exhausted` once end-of-stream has
/// been reported (and stays there; there is no resurrection), becomes
/// `Failed` on the first decode error, and becomes `Closed` on an explicit
/// close. Reads on a failed or closed reader fail with an
/// `InvalidOperation` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReaderState {
    Active,
    Exhausted,
    Failed,
    Closed,
}

impl ReaderState {
    /// Checks whether a read call may proceed, translating the terminal
    /// states into their contractual outcome.
    ///
    /// Returns `Ok(true)` when the reader is active, `Ok(false)` when it is
    /// exhausted (the caller reports end-of-stream again), and an error for
    /// the failed and closed states.
    pub(crate) fn check_readable(&self, operation: &str) -> Result<bool> {
        match self {
            ReaderState::Active => Ok(true),
            ReaderState::Exhausted => Ok(false),
            ReaderState::Failed => Err(Error::invalid_operation(format!(
                "{operation} on a failed reader"
            ))),
            ReaderState::Closed => Err(Error::invalid_operation(format!(
                "{operation} on a closed reader"
            ))),
        }
    }
}

/// Builder for configuring and constructing projected readers.
///
/// The projection defaults to whole-row materialization of every column
/// (the structured-row baseline); the batch capacity defaults to
/// [`DEFAULT_BATCH_CAPACITY`] and applies to vectorized readers only.
#[derive(Clone)]
pub struct ReaderBuilder {
    store: Arc<dyn ColumnStore>,
    projection: Option<ReadProjection>,
    batch_capacity: usize,
}

impl ReaderBuilder {
    /// Creates a new builder over the given store.
    pub fn new(store: Arc<dyn ColumnStore>) -> ReaderBuilder {
        ReaderBuilder {
            store,
            projection: None,
            batch_capacity: DEFAULT_BATCH_CAPACITY,
        }
    }

    /// Sets the column projection for the readers built by this builder.
    pub fn with_projection(self, projection: ReadProjection) -> Self {
        Self {
            projection: Some(projection),
            ..self
        }
    }

    /// Sets the number of rows per vectorized batch.
    ///
    /// # Panics
    ///
    /// Panics if `batch_capacity` is zero.
    pub fn with_batch_capacity(self, batch_capacity: usize) -> Self {
        assert_ne!(batch_capacity, 0);
        Self {
            batch_capacity,
            ..self
        }
    }

    /// Builds a row-wise reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a projected column fails to resolve against the
    /// store.
    pub fn build_row_reader(&self) -> Result<RowReader> {
        let projection = self.resolve_projection();
        let cursors = projection
            .fields()
            .iter()
            .map(|field| {
                let decoder = self.store.create_decoder(field)?;
                Ok(FieldCursor::new(
                    decoder,
                    ValueVector::with_capacity(field.type_desc(), 1),
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "row reader over {} rows, projection {}",
            self.store.row_count(),
            projection
        );
        Ok(RowReader::new(projection, cursors, self.store.row_count()))
    }

    /// Builds a vectorized reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a projected column fails to resolve against the
    /// store.
    pub fn build_batch_reader(&self) -> Result<BatchReader> {
        let projection = self.resolve_projection();
        let decoders: Vec<Box<dyn ColumnDecoder>> = if projection.materializes_rows() {
            let cursors = projection
                .fields()
                .iter()
                .map(|field| {
                    let decoder = self.store.create_decoder(field)?;
                    Ok(FieldCursor::new(
                        decoder,
                        ValueVector::with_capacity(field.type_desc(), self.batch_capacity),
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            vec![Box::new(RowMaterializer::new(projection.clone(), cursors)) as _]
        } else {
            projection
                .fields()
                .iter()
                .map(|field| self.store.create_decoder(field))
                .collect::<Result<Vec<_>>>()?
        };
        log::debug!(
            "batch reader over {} rows, capacity {}, projection {}",
            self.store.row_count(),
            self.batch_capacity,
            projection
        );
        Ok(BatchReader::new(
            projection,
            decoders,
            self.batch_capacity,
            self.store.row_count(),
        ))
    }

    fn resolve_projection(&self) -> Arc<ReadProjection> {
        Arc::new(
            self.projection
                .clone()
                .unwrap_or_else(|| ReadProjection::whole_rows(self.store.schema().clone())),
        )
    }
}
