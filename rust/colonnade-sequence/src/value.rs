//! Dynamically typed single values, as surfaced by the row-wise read path.

/// A 96-bit timestamp value.
///
/// The layout follows the storage convention: 12 bytes, a little-endian
/// 64-bit nanosecond-of-day count followed by a little-endian 32-bit Julian
/// day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Timestamp96([u8; 12]);

impl Timestamp96 {
    /// Creates a timestamp from a nanosecond-of-day count and a Julian day.
    pub fn new(nanos_of_day: u64, julian_day: u32) -> Timestamp96 {
        let mut bytes = [0u8; 12];
        bytes[..8].copy_from_slice(&nanos_of_day.to_le_bytes());
        bytes[8..].copy_from_slice(&julian_day.to_le_bytes());
        Timestamp96(bytes)
    }

    /// Creates a timestamp from its 12-byte storage representation.
    pub fn from_bytes(bytes: [u8; 12]) -> Timestamp96 {
        Timestamp96(bytes)
    }

    /// Returns the nanosecond-of-day component.
    pub fn nanos_of_day(&self) -> u64 {
        u64::from_le_bytes(self.0[..8].try_into().unwrap())
    }

    /// Returns the Julian day component.
    pub fn julian_day(&self) -> u32 {
        u32::from_le_bytes(self.0[8..].try_into().unwrap())
    }

    /// Returns the 12-byte storage representation.
    pub fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}

/// A single dynamically typed value.
///
/// This is the unit of the row-wise access path: every field access on a
/// [`Row`](crate::row::Row) resolves the column by name and matches on this
/// tagged union. The vectorized path avoids this per-value dispatch
/// entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value of a nullable column.
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    /// Variable-length byte sequence.
    Binary(Box<[u8]>),
    /// Fixed-length byte sequence.
    FixedBinary(Box<[u8]>),
    Timestamp96(Timestamp96),
}

impl Value {
    /// Returns `true` if this is the null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns a short name of the value's type, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Binary(_) => "Binary",
            Value::FixedBinary(_) => "FixedBinary",
            Value::Timestamp96(_) => "Timestamp96",
        }
    }
}
