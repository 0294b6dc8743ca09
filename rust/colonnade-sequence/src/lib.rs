//! The batch and column-vector data model of the colonnade read path.
//!
//! A read produces data in one of two shapes:
//!
//! - **Column vectors** ([`vector::ValueVector`], [`vector::RowVector`]) —
//!   typed, densely stored buffers holding one column's values for a window
//!   of rows, with null tracking via [`presence::Presence`] and
//!   variable-length value boundaries via [`offsets::Offsets`].
//! - **Structured rows** ([`row::Row`]) — one materialized record with
//!   per-field dynamic access through the [`value::Value`] tagged union.
//!
//! A [`batch::RowBatch`] groups one vector per projected column into a
//! fixed-capacity window of rows. Batches are recycled: the reader
//! overwrites a returned batch in place on the next fill instead of
//! allocating a new one.
//!
//! Vectors are type-erased behind the [`vector::ColumnVector`] trait so a
//! batch can carry heterogeneous columns; consumers downcast to the
//! concrete vector once per column, not per value.

pub mod batch;
pub mod offsets;
pub mod presence;
pub mod row;
pub mod value;
pub mod values;
pub mod vector;
