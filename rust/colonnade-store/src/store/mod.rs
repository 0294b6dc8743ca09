//! The column store boundary.
//!
//! A [`ColumnStore`] is the seam between the read path and the storage
//! format layer: it exposes the schema, the total row count, and a factory
//! for per-column decoders. The file format, compression and encoding
//! schemes live on the far side of this trait; the readers only ever see
//! decoded values flowing out of [`ColumnDecoder`] fills.

use colonnade_common::Result;
use colonnade_format::projection::ProjectedField;
use colonnade_format::schema::Schema;

use crate::read::decoder::ColumnDecoder;

pub mod decoded;
pub mod decoders;

/// A readable snapshot of columnar data.
///
/// Implementations are immutable once opened and shareable across readers;
/// each reader obtains its own decoders and owns its own cursor state.
pub trait ColumnStore: Send + Sync + 'static {
    /// Returns the schema of the stored data.
    fn schema(&self) -> &Schema;

    /// Returns the total number of stored rows.
    fn row_count(&self) -> u64;

    /// Creates a decoder for one projected column.
    ///
    /// The decoder is specialized to the column's declared type; only
    /// columns that are actually projected ever get a decoder, so data of
    /// non-projected columns is never touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the projected field does not resolve against
    /// this store or its declared type disagrees with the stored column.
    fn create_decoder(&self, field: &ProjectedField) -> Result<Box<dyn ColumnDecoder>>;
}
