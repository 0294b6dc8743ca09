//! Byte buffer with alignment guarantees, underlying all colonnade value
//! storage.
//!
//! Column values are stored as raw bytes and reinterpreted as typed slices
//! through `bytemuck`. The reinterpretation is only sound when the backing
//! allocation is sufficiently aligned for the target type, which a plain
//! `Vec<u8>` does not guarantee. [`buffer::AlignedVec`] provides that
//! guarantee.

pub mod align;
pub mod buffer;

pub use buffer::AlignedVec;
