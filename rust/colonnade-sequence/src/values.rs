//! Raw value storage as bytes with alignment guarantees.

use colonnade_bytes::AlignedVec;

/// A collection of values stored as bytes.
///
/// `Values` wraps an [`AlignedVec`] and provides typed views over the raw
/// bytes. The element type is chosen by the caller at each access; the
/// container itself only tracks bytes.
#[derive(Debug, Clone, Default)]
pub struct Values(AlignedVec);

impl Values {
    /// Creates a new, empty `Values` container.
    pub fn new() -> Values {
        Values(AlignedVec::new())
    }

    /// Creates an empty container with capacity for `capacity` elements of
    /// type `T`.
    pub fn with_capacity<T>(capacity: usize) -> Values {
        Values(AlignedVec::with_capacity(
            capacity * std::mem::size_of::<T>(),
        ))
    }

    /// Creates an empty container with the specified byte capacity.
    pub fn with_byte_capacity(capacity: usize) -> Values {
        Values(AlignedVec::with_capacity(capacity))
    }

    /// Returns `true` if the container holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of whole elements of type `T` currently stored.
    #[inline]
    pub fn len<T>(&self) -> usize {
        self.0.len() / std::mem::size_of::<T>()
    }

    /// Returns the number of stored bytes.
    #[inline]
    pub fn bytes_len(&self) -> usize {
        self.0.len()
    }

    /// Returns a view of the underlying bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Interprets the content as a slice of `T`.
    #[inline]
    pub fn as_slice<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        self.0.typed_data()
    }

    /// Interprets the content as a mutable slice of `T`.
    #[inline]
    pub fn as_mut_slice<T>(&mut self) -> &mut [T]
    where
        T: bytemuck::AnyBitPattern + bytemuck::NoUninit,
    {
        self.0.typed_data_mut()
    }

    /// Appends a single element of type `T`.
    #[inline]
    pub fn push<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        self.0.push_typed(value);
    }

    /// Appends all elements of a typed slice.
    #[inline]
    pub fn extend_from_slice<T>(&mut self, values: &[T])
    where
        T: bytemuck::NoUninit,
    {
        self.0.extend_from_typed_slice(values);
    }

    /// Appends a raw byte slice.
    #[inline]
    pub fn extend_from_bytes(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Grows the container to exactly `new_len` bytes, filling any added
    /// space with zeros.
    pub fn resize_zeroed_bytes(&mut self, new_len: usize) {
        self.0.resize(new_len, 0);
    }

    /// Truncates the container to exactly `new_len` bytes.
    pub fn truncate_bytes(&mut self, new_len: usize) {
        self.0.truncate(new_len);
    }

    /// Clears the container, keeping the allocation.
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_view() {
        let mut values = Values::new();
        values.push(10i32);
        values.push(20i32);
        values.push(30i32);
        assert_eq!(values.len::<i32>(), 3);
        assert_eq!(values.bytes_len(), 12);
        assert_eq!(values.as_slice::<i32>(), &[10, 20, 30]);
    }

    #[test]
    fn test_extend_from_slice() {
        let mut values = Values::with_capacity::<f64>(4);
        values.extend_from_slice(&[1.5f64, 2.5]);
        values.extend_from_slice(&[3.5f64]);
        assert_eq!(values.as_slice::<f64>(), &[1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_mutable_view() {
        let mut values = Values::new();
        values.extend_from_slice(&[1u64, 2, 3]);
        values.as_mut_slice::<u64>()[0] = 100;
        assert_eq!(values.as_slice::<u64>(), &[100, 2, 3]);
    }

    #[test]
    fn test_resize_zeroed_bytes() {
        let mut values = Values::new();
        values.push(0xFFFF_FFFFu32);
        values.resize_zeroed_bytes(8);
        assert_eq!(values.as_slice::<u32>(), &[0xFFFF_FFFF, 0]);
    }

    #[test]
    fn test_clear_keeps_nothing() {
        let mut values = Values::new();
        values.extend_from_slice(&[1u8, 2, 3]);
        values.clear();
        assert!(values.is_empty());
        assert_eq!(values.len::<u8>(), 0);
    }

    #[test]
    fn test_truncate_bytes() {
        let mut values = Values::new();
        values.extend_from_slice(&[1u32, 2, 3]);
        values.truncate_bytes(8);
        assert_eq!(values.as_slice::<u32>(), &[1, 2]);
    }
}
