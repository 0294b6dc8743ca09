//! In-memory schema model: basic types, type descriptors, fields.

use std::sync::{Arc, OnceLock};

use ahash::AHashMap;
use colonnade_common::{Result, verify_arg};

/// The physical type of the values stored in a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BasicType {
    /// Logical true/false, stored as one byte per value.
    Boolean = 0,

    /// 32-bit integer.
    Int32 = 1,

    /// 64-bit integer.
    Int64 = 2,

    /// 32-bit IEEE-754 floating point.
    Float32 = 3,

    /// 64-bit IEEE-754 floating point.
    Float64 = 4,

    /// Variable-length byte sequence.
    Binary = 5,

    /// Fixed-length byte sequence; the length is carried by the descriptor.
    FixedSizeBinary = 6,

    /// 96-bit timestamp: a nanosecond-of-day count plus a Julian day number.
    Timestamp96 = 7,

    /// A materialized whole record. Used only by the structured-row read
    /// mode; never a stored column type.
    Struct = 8,
}

impl BasicType {
    /// Returns `true` if the value sequence for this type requires offset
    /// encoding (variable-length values).
    pub fn requires_offsets(&self) -> bool {
        matches!(self, BasicType::Binary)
    }

    /// Returns `true` if this is one of the integer types.
    pub fn is_integer(&self) -> bool {
        matches!(self, BasicType::Int32 | BasicType::Int64)
    }

    /// Returns `true` if this type can be signed.
    pub fn allows_signed(&self) -> bool {
        self.is_integer() || matches!(self, BasicType::Float32 | BasicType::Float64)
    }
}

impl std::fmt::Display for BasicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Describes a basic column type, including its size and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasicTypeDescriptor {
    /// The underlying physical type of the value.
    pub basic_type: BasicType,
    /// The value size in bytes for `FixedSizeBinary`; zero for any other
    /// basic type.
    pub fixed_size: usize,
    /// Indicates whether the type is signed. May be `true` only for the
    /// numeric types.
    pub signed: bool,
}

impl BasicTypeDescriptor {
    /// Creates a descriptor for a non-numeric, non-fixed-size type.
    pub fn new(basic_type: BasicType) -> BasicTypeDescriptor {
        BasicTypeDescriptor {
            basic_type,
            fixed_size: 0,
            signed: false,
        }
    }

    /// Creates a descriptor for a signed numeric type.
    pub fn signed(basic_type: BasicType) -> BasicTypeDescriptor {
        assert!(basic_type.allows_signed());
        BasicTypeDescriptor {
            basic_type,
            fixed_size: 0,
            signed: true,
        }
    }

    /// Creates a `FixedSizeBinary` descriptor with the given value size.
    pub fn fixed_binary(fixed_size: usize) -> BasicTypeDescriptor {
        assert_ne!(fixed_size, 0);
        BasicTypeDescriptor {
            basic_type: BasicType::FixedSizeBinary,
            fixed_size,
            signed: false,
        }
    }

    /// Returns the size in bytes of a single stored value slot, or `None`
    /// for types without a fixed per-value size (`Binary`, `Struct`).
    pub fn primitive_size(&self) -> Option<usize> {
        match self.basic_type {
            BasicType::Boolean => Some(1),
            BasicType::Int32 | BasicType::Float32 => Some(4),
            BasicType::Int64 | BasicType::Float64 => Some(8),
            BasicType::Timestamp96 => Some(12),
            BasicType::FixedSizeBinary => Some(self.fixed_size),
            BasicType::Binary | BasicType::Struct => None,
        }
    }
}

/// A named column within a [`Schema`].
#[derive(Debug, Clone)]
pub struct Field {
    name: Arc<str>,
    desc: BasicTypeDescriptor,
    nullable: bool,
}

impl Field {
    /// Creates a new field with the given name and type descriptor.
    pub fn new(name: impl Into<Arc<str>>, desc: BasicTypeDescriptor, nullable: bool) -> Field {
        Field {
            name: name.into(),
            desc,
            nullable,
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field name as a shared string.
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Returns the type descriptor of the field.
    pub fn type_desc(&self) -> BasicTypeDescriptor {
        self.desc
    }

    /// Returns `true` if the column may contain null values.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

/// An ordered collection of named, typed columns.
///
/// A schema is immutable once constructed. Field lookup by name uses a
/// linear scan for small schemas and a lazily built hash map once the field
/// count goes past a small threshold, since most schemas in practice carry
/// only a handful of columns.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Arc<[Field]>,
    lookup: Arc<OnceLock<AHashMap<Arc<str>, usize>>>,
}

/// Field-count threshold below which name lookup stays a linear scan.
const LINEAR_LOOKUP_LIMIT: usize = 4;

impl Schema {
    /// Creates a schema from an ordered list of fields.
    ///
    /// # Errors
    ///
    /// Returns an error if two fields share a name, or if a `Struct` field
    /// appears (whole records are a read-mode concept, not a stored column).
    pub fn new(fields: Vec<Field>) -> Result<Schema> {
        for (i, field) in fields.iter().enumerate() {
            verify_arg!(
                fields,
                field.type_desc().basic_type != BasicType::Struct
            );
            verify_arg!(
                fields,
                fields[..i].iter().all(|prior| prior.name() != field.name())
            );
        }
        Ok(Schema {
            fields: fields.into(),
            lookup: Arc::new(OnceLock::new()),
        })
    }

    /// Returns the number of fields in the schema.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at the given position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn field(&self, index: usize) -> &Field {
        &self.fields[index]
    }

    /// Returns all fields in schema order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds a field position by name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        if self.fields.len() <= LINEAR_LOOKUP_LIMIT {
            return self.fields.iter().position(|field| field.name() == name);
        }
        let lookup = self.lookup.get_or_init(|| {
            self.fields
                .iter()
                .enumerate()
                .map(|(i, field)| (field.name_arc().clone(), i))
                .collect()
        });
        lookup.get(name).copied()
    }

    /// Finds a field by name.
    pub fn find(&self, name: &str) -> Option<(usize, &Field)> {
        self.position_of(name).map(|pos| (pos, self.field(pos)))
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name(), field.type_desc().basic_type)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new(vec![
            Field::new("id", BasicTypeDescriptor::signed(BasicType::Int64), false),
            Field::new("name", BasicTypeDescriptor::new(BasicType::Binary), true),
            Field::new(
                "score",
                BasicTypeDescriptor::signed(BasicType::Float64),
                true,
            ),
            Field::new(
                "tag",
                BasicTypeDescriptor::fixed_binary(16),
                false,
            ),
            Field::new(
                "created",
                BasicTypeDescriptor::new(BasicType::Timestamp96),
                false,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_primitive_size() {
        assert_eq!(
            BasicTypeDescriptor::new(BasicType::Boolean).primitive_size(),
            Some(1)
        );
        assert_eq!(
            BasicTypeDescriptor::signed(BasicType::Int32).primitive_size(),
            Some(4)
        );
        assert_eq!(
            BasicTypeDescriptor::new(BasicType::Timestamp96).primitive_size(),
            Some(12)
        );
        assert_eq!(
            BasicTypeDescriptor::fixed_binary(10).primitive_size(),
            Some(10)
        );
        assert_eq!(
            BasicTypeDescriptor::new(BasicType::Binary).primitive_size(),
            None
        );
    }

    #[test]
    fn test_lookup_past_linear_threshold() {
        let schema = sample_schema();
        assert!(schema.len() > LINEAR_LOOKUP_LIMIT);
        assert_eq!(schema.position_of("id"), Some(0));
        assert_eq!(schema.position_of("created"), Some(4));
        assert_eq!(schema.position_of("missing"), None);
        let (pos, field) = schema.find("tag").unwrap();
        assert_eq!(pos, 3);
        assert_eq!(field.type_desc().fixed_size, 16);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Schema::new(vec![
            Field::new("a", BasicTypeDescriptor::signed(BasicType::Int32), false),
            Field::new("a", BasicTypeDescriptor::signed(BasicType::Int64), false),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_struct_fields_rejected() {
        let result = Schema::new(vec![Field::new(
            "row",
            BasicTypeDescriptor::new(BasicType::Struct),
            false,
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        let schema = Schema::new(vec![
            Field::new("a", BasicTypeDescriptor::signed(BasicType::Int32), false),
            Field::new("b", BasicTypeDescriptor::new(BasicType::Binary), true),
        ])
        .unwrap();
        assert_eq!(schema.to_string(), "(a: Int32, b: Binary)");
    }
}
