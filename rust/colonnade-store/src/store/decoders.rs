//! Type-specialized column decoders for the decoded in-memory store.
//!
//! One decoder type exists per storage shape: fixed-size values (all
//! primitives, including booleans and timestamps, via the generic
//! [`PrimitiveDecoder`]), variable-length binary, and fixed-length binary.
//! The type dispatch happens once, when the store creates the decoder; the
//! fill loops below are monomorphic.
//!
//! Decoders validate the buffers they read lazily, per filled range, and
//! surface corruption as `InvalidFormat` errors at the failing fill.

use std::marker::PhantomData;
use std::ops::Range;
use std::sync::Arc;

use colonnade_common::{Result, error::Error, verify_arg};
use colonnade_sequence::vector::{ColumnVector, ValueVector};

use crate::read::decoder::ColumnDecoder;

/// Resolves a fill's position range against the column length and returns
/// it as `usize` bounds.
fn resolve_range(column: &ValueVector, pos_range: &Range<u64>) -> Result<(usize, usize)> {
    verify_arg!(pos_range, pos_range.start <= pos_range.end);
    verify_arg!(pos_range, pos_range.end <= column.len() as u64);
    Ok((pos_range.start as usize, pos_range.end as usize))
}

fn expect_value_vector<'a>(dst: &'a mut dyn ColumnVector) -> Result<&'a mut ValueVector> {
    dst.as_value_vector_mut()
        .ok_or_else(|| Error::invalid_arg("dst", "expected a value vector"))
}

/// Decoder for columns whose values have a fixed in-memory size: integers,
/// floats, booleans (one byte per value) and 96-bit timestamps.
pub struct PrimitiveDecoder<T> {
    name: Arc<str>,
    column: Arc<ValueVector>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PrimitiveDecoder<T> {
    pub fn new(name: Arc<str>, column: Arc<ValueVector>) -> PrimitiveDecoder<T> {
        PrimitiveDecoder {
            name,
            column,
            _marker: PhantomData,
        }
    }
}

impl<T> ColumnDecoder for PrimitiveDecoder<T>
where
    T: bytemuck::AnyBitPattern + bytemuck::NoUninit + Send + Sync + 'static,
{
    fn fill(&mut self, dst: &mut dyn ColumnVector, pos_range: Range<u64>) -> Result<()> {
        let (start, end) = resolve_range(&self.column, &pos_range)?;
        let src = self.column.values.as_slice::<T>();
        if src.len() < end {
            return Err(Error::invalid_format(
                format!("column '{}'", self.name),
                "value buffer is shorter than the declared row count",
            ));
        }
        let dst = expect_value_vector(dst)?;
        dst.values.extend_from_slice(&src[start..end]);
        dst.presence
            .extend_from_range(&self.column.presence, start, end - start);
        Ok(())
    }
}

/// Decoder for variable-length binary columns.
pub struct BinaryDecoder {
    name: Arc<str>,
    column: Arc<ValueVector>,
}

impl BinaryDecoder {
    pub fn new(name: Arc<str>, column: Arc<ValueVector>) -> BinaryDecoder {
        BinaryDecoder { name, column }
    }

    fn corrupt(&self, message: &str) -> Error {
        Error::invalid_format(format!("column '{}'", self.name), message)
    }
}

impl ColumnDecoder for BinaryDecoder {
    fn fill(&mut self, dst: &mut dyn ColumnVector, pos_range: Range<u64>) -> Result<()> {
        let (start, end) = resolve_range(&self.column, &pos_range)?;
        let offsets = self
            .column
            .offsets
            .as_ref()
            .ok_or_else(|| self.corrupt("missing offsets"))?;
        let off = offsets.as_slice();
        if off.len() < end + 1 {
            return Err(self.corrupt("offset buffer is shorter than the declared row count"));
        }
        for i in start..end {
            if off[i] > off[i + 1] {
                return Err(self.corrupt("non-monotonic value offsets"));
            }
        }
        let byte_start = off[start] as usize;
        let byte_end = off[end] as usize;
        if byte_start > byte_end || byte_end > self.column.values.bytes_len() {
            return Err(self.corrupt("value offsets point past the value buffer"));
        }

        let dst = expect_value_vector(dst)?;
        let dst_offsets = dst
            .offsets
            .as_mut()
            .ok_or_else(|| Error::invalid_arg("dst", "expected a binary vector"))?;
        for i in start..end {
            dst_offsets.push_length((off[i + 1] - off[i]) as usize);
        }
        dst.values
            .extend_from_bytes(&self.column.values.as_bytes()[byte_start..byte_end]);
        dst.presence
            .extend_from_range(&self.column.presence, start, end - start);
        Ok(())
    }
}

/// Decoder for fixed-length binary columns.
pub struct FixedBinaryDecoder {
    name: Arc<str>,
    column: Arc<ValueVector>,
    fixed_size: usize,
}

impl FixedBinaryDecoder {
    pub fn new(name: Arc<str>, column: Arc<ValueVector>) -> FixedBinaryDecoder {
        let fixed_size = column.type_desc.fixed_size;
        FixedBinaryDecoder {
            name,
            column,
            fixed_size,
        }
    }
}

impl ColumnDecoder for FixedBinaryDecoder {
    fn fill(&mut self, dst: &mut dyn ColumnVector, pos_range: Range<u64>) -> Result<()> {
        let (start, end) = resolve_range(&self.column, &pos_range)?;
        let byte_start = start * self.fixed_size;
        let byte_end = end * self.fixed_size;
        if byte_end > self.column.values.bytes_len() {
            return Err(Error::invalid_format(
                format!("column '{}'", self.name),
                "value buffer is shorter than the declared row count",
            ));
        }
        let dst = expect_value_vector(dst)?;
        dst.values
            .extend_from_bytes(&self.column.values.as_bytes()[byte_start..byte_end]);
        dst.presence
            .extend_from_range(&self.column.presence, start, end - start);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colonnade_format::schema::{BasicType, BasicTypeDescriptor};

    fn int_column(values: &[i64]) -> Arc<ValueVector> {
        let mut vector = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int64));
        vector.extend_from_slice(values);
        Arc::new(vector)
    }

    #[test]
    fn test_primitive_fill_appends() {
        let mut decoder = PrimitiveDecoder::<i64>::new("c".into(), int_column(&[1, 2, 3, 4, 5]));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int64));
        decoder.fill(&mut dst, 1..3).unwrap();
        decoder.fill(&mut dst, 3..5).unwrap();
        assert_eq!(dst.as_slice::<i64>(), &[2, 3, 4, 5]);
        assert_eq!(dst.len(), 4);
    }

    #[test]
    fn test_primitive_fill_out_of_bounds_range() {
        let mut decoder = PrimitiveDecoder::<i64>::new("c".into(), int_column(&[1, 2]));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int64));
        assert!(decoder.fill(&mut dst, 1..3).is_err());
    }

    #[test]
    fn test_primitive_fill_truncated_buffer() {
        let mut column = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int64));
        column.extend_from_slice(&[1i64, 2, 3, 4]);
        column.values.truncate_bytes(16);
        let mut decoder = PrimitiveDecoder::<i64>::new("c".into(), Arc::new(column));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::signed(BasicType::Int64));
        // The early range still decodes; the tail hits the truncation.
        decoder.fill(&mut dst, 0..2).unwrap();
        let err = decoder.fill(&mut dst, 2..4).unwrap_err();
        assert!(err.to_string().contains("invalid storage data"));
    }

    #[test]
    fn test_binary_fill() {
        let mut column = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        column.push_binary(b"ab");
        column.push_null();
        column.push_binary(b"cde");
        let mut decoder = BinaryDecoder::new("b".into(), Arc::new(column));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        decoder.fill(&mut dst, 0..3).unwrap();
        assert_eq!(dst.len(), 3);
        assert_eq!(dst.binary_at(0), b"ab");
        assert!(dst.is_null(1));
        assert_eq!(dst.binary_at(2), b"cde");
    }

    #[test]
    fn test_binary_fill_detects_truncated_values() {
        let mut column = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        column.push_binary(b"abcd");
        column.push_binary(b"efgh");
        column.values.truncate_bytes(6);
        let mut decoder = BinaryDecoder::new("b".into(), Arc::new(column));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::new(BasicType::Binary));
        decoder.fill(&mut dst, 0..1).unwrap();
        assert!(decoder.fill(&mut dst, 1..2).is_err());
    }

    #[test]
    fn test_fixed_binary_fill() {
        let mut column = ValueVector::empty(BasicTypeDescriptor::fixed_binary(2));
        column.push_binary(b"aa");
        column.push_binary(b"bb");
        column.push_binary(b"cc");
        let mut decoder = FixedBinaryDecoder::new("f".into(), Arc::new(column));
        let mut dst = ValueVector::empty(BasicTypeDescriptor::fixed_binary(2));
        decoder.fill(&mut dst, 1..3).unwrap();
        assert_eq!(dst.len(), 2);
        assert_eq!(dst.binary_at(0), b"bb");
        assert_eq!(dst.binary_at(1), b"cc");
    }
}
