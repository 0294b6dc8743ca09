//! Schema model and read projections for the colonnade column store.
//!
//! This crate defines the in-memory description of stored data: the basic
//! value types ([`schema::BasicType`]), per-column type descriptors
//! ([`schema::BasicTypeDescriptor`]), the column schema ([`schema::Schema`])
//! and the read-time column selection ([`projection::ReadProjection`]).
//!
//! Parsing of persisted schema metadata belongs to the storage format layer
//! and is out of scope here; readers operate on an already-materialized
//! `Schema`.

pub mod projection;
pub mod schema;
