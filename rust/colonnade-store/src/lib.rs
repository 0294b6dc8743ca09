//! The colonnade read path: projected readers over a decoded column store.
//!
//! This crate ties the data model together into the two read modes:
//!
//! - **Row-wise** ([`read::row_reader::RowReader`]) — a cursor yielding one
//!   materialized [`Row`](colonnade_sequence::row::Row) per call, with
//!   per-field dynamic dispatch on every access.
//! - **Vectorized** ([`read::batch_reader::BatchReader`]) — a cursor
//!   filling a recycled [`RowBatch`](colonnade_sequence::batch::RowBatch)
//!   of typed column vectors per call, with a single virtual dispatch per
//!   column per batch and monomorphic inner fill loops.
//!
//! Both are configured through [`read::ReaderBuilder`] with a
//! [`ReadProjection`](colonnade_format::projection::ReadProjection) and a
//! batch capacity, and drive [`read::decoder::ColumnDecoder`]s created by a
//! [`store::ColumnStore`]. The [`store::decoded::DecodedColumnStore`] is
//! the in-memory store implementation backing tests and benchmarks; the
//! on-disk format and codec layer that would produce such decoded columns
//! lives behind the same seam.

pub mod read;
pub mod store;
pub mod tests;
