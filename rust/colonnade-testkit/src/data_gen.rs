//! Generation of synthetic column data.
//!
//! The canonical test schema mirrors the classic read-benchmark layout:
//! one column per supported value type, with a couple of nullable columns
//! to exercise validity tracking. Generation is deterministic per
//! `(seed, column)` pair, so individual columns can be regenerated
//! independently of each other.

use colonnade_format::schema::{BasicType, BasicTypeDescriptor, Field, Schema};
use colonnade_sequence::value::Timestamp96;
use colonnade_sequence::vector::ValueVector;

/// Length of the fixed-size binary column in [`benchmark_schema`].
pub const FLBA_SIZE: usize = 16;

/// Fraction of null entries generated for nullable columns.
const NULLS_FRACTION: f64 = 0.1;

/// Maximum generated length of a variable-length binary value.
const MAX_BINARY_LEN: usize = 24;

/// Returns the canonical eight-column benchmark schema.
///
/// The `binary_field` and `double_field` columns are nullable; all others
/// are required.
pub fn benchmark_schema() -> Schema {
    Schema::new(vec![
        Field::new("binary_field", BasicTypeDescriptor::new(BasicType::Binary), true),
        Field::new(
            "int32_field",
            BasicTypeDescriptor::signed(BasicType::Int32),
            false,
        ),
        Field::new(
            "int64_field",
            BasicTypeDescriptor::signed(BasicType::Int64),
            false,
        ),
        Field::new(
            "boolean_field",
            BasicTypeDescriptor::new(BasicType::Boolean),
            false,
        ),
        Field::new(
            "float_field",
            BasicTypeDescriptor::signed(BasicType::Float32),
            false,
        ),
        Field::new(
            "double_field",
            BasicTypeDescriptor::signed(BasicType::Float64),
            true,
        ),
        Field::new(
            "flba_field",
            BasicTypeDescriptor::fixed_binary(FLBA_SIZE),
            false,
        ),
        Field::new(
            "int96_field",
            BasicTypeDescriptor::new(BasicType::Timestamp96),
            false,
        ),
    ])
    .expect("benchmark schema")
}

/// Generates one decoded vector per schema column, each holding
/// `row_count` values.
pub fn generate_columns(schema: &Schema, row_count: usize, seed: u64) -> Vec<ValueVector> {
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(pos, field)| generate_column(field, pos, row_count, seed))
        .collect()
}

/// Generates a single decoded column vector.
pub fn generate_column(field: &Field, pos: usize, row_count: usize, seed: u64) -> ValueVector {
    let mut rng =
        fastrand::Rng::with_seed(seed ^ ((pos as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)));
    let desc = field.type_desc();
    let mut vector = ValueVector::with_capacity(desc, row_count);
    for _ in 0..row_count {
        if field.is_nullable() && rng.f64() < NULLS_FRACTION {
            vector.push_null();
            continue;
        }
        match desc.basic_type {
            BasicType::Boolean => vector.push_value(rng.bool() as u8),
            BasicType::Int32 => vector.push_value(rng.i32(..)),
            BasicType::Int64 => vector.push_value(rng.i64(..)),
            BasicType::Float32 => vector.push_value(rng.f32()),
            BasicType::Float64 => vector.push_value(rng.f64()),
            BasicType::Binary => {
                let len = rng.usize(0..=MAX_BINARY_LEN);
                let mut bytes = vec![0u8; len];
                rng.fill(&mut bytes);
                vector.push_binary(&bytes);
            }
            BasicType::FixedSizeBinary => {
                let mut bytes = vec![0u8; desc.fixed_size];
                rng.fill(&mut bytes);
                vector.push_binary(&bytes);
            }
            BasicType::Timestamp96 => {
                let ts = Timestamp96::new(rng.u64(0..86_400_000_000_000), rng.u32(2_400_000..2_500_000));
                vector.push_value(ts);
            }
            BasicType::Struct => unreachable!("schemas never carry struct columns"),
        }
    }
    vector
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_is_deterministic() {
        let schema = benchmark_schema();
        let a = generate_columns(&schema, 100, 17);
        let b = generate_columns(&schema, 100, 17);
        for (left, right) in a.iter().zip(&b) {
            assert_eq!(left.len(), 100);
            assert_eq!(left.values.as_bytes(), right.values.as_bytes());
            assert_eq!(left.presence, right.presence);
        }
    }

    #[test]
    fn test_seeds_differ() {
        let schema = benchmark_schema();
        let a = generate_columns(&schema, 100, 1);
        let b = generate_columns(&schema, 100, 2);
        let a_ints = a[1].as_slice::<i32>();
        let b_ints = b[1].as_slice::<i32>();
        assert_ne!(a_ints, b_ints);
    }

    #[test]
    fn test_nullable_columns_carry_nulls() {
        let schema = benchmark_schema();
        let columns = generate_columns(&schema, 2000, 3);
        assert!(columns[0].presence.count_nulls() > 0);
        assert!(columns[5].presence.count_nulls() > 0);
        // Required columns stay fully populated.
        assert_eq!(columns[1].presence.count_nulls(), 0);
    }

    #[test]
    fn test_fixed_binary_lengths() {
        let schema = benchmark_schema();
        let columns = generate_columns(&schema, 50, 9);
        let flba = &columns[6];
        for i in 0..flba.len() {
            assert_eq!(flba.binary_at(i).len(), FLBA_SIZE);
        }
    }
}
