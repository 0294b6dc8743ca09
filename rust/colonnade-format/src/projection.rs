//! Read-time column selection.
//!
//! A [`ReadProjection`] is the immutable configuration of one reader
//! instance: which columns to materialize, in what order, and whether to
//! materialize them as typed column vectors or as whole structured rows.
//! It is fixed at reader construction and determines both the row-wise
//! accessor set and the vectorized batch's column arity and order.

use std::sync::{Arc, OnceLock};

use ahash::AHashMap;
use colonnade_common::{Result, error::Error};

use crate::schema::{BasicTypeDescriptor, Schema};

/// One column selected by a [`ReadProjection`].
#[derive(Debug, Clone)]
pub struct ProjectedField {
    name: Arc<str>,
    desc: BasicTypeDescriptor,
    nullable: bool,
    schema_pos: usize,
}

impl ProjectedField {
    /// Returns the column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column name as a shared string.
    pub fn name_arc(&self) -> &Arc<str> {
        &self.name
    }

    /// Returns the type descriptor of the projected column.
    pub fn type_desc(&self) -> BasicTypeDescriptor {
        self.desc
    }

    /// Returns `true` if the column may contain nulls.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns the position of the column within the full schema.
    pub fn schema_pos(&self) -> usize {
        self.schema_pos
    }
}

/// An ordered selection of columns to materialize from a store.
///
/// Three configurations exist:
///
/// - [`ReadProjection::columns`] — an explicit ordered subset; the order of
///   the names is the order of the batch columns and row fields.
/// - [`ReadProjection::all_columns`] — every schema column, as typed fields.
/// - [`ReadProjection::whole_rows`] — no column selection; every column is
///   decoded and the reader materializes complete structured rows (a single
///   row-valued column in batch mode).
#[derive(Debug, Clone)]
pub struct ReadProjection {
    schema: Schema,
    fields: Arc<[ProjectedField]>,
    materialize_rows: bool,
    lookup: Arc<OnceLock<AHashMap<Arc<str>, usize>>>,
}

/// Field-count threshold below which name lookup stays a linear scan.
const LINEAR_LOOKUP_LIMIT: usize = 4;

impl ReadProjection {
    /// Creates a projection of an explicit ordered subset of columns.
    ///
    /// # Errors
    ///
    /// Returns a `FieldNotFound` error if any name is absent from the
    /// schema.
    pub fn columns<S: AsRef<str>>(
        schema: Schema,
        names: impl IntoIterator<Item = S>,
    ) -> Result<ReadProjection> {
        let fields = names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                let (pos, field) = schema
                    .find(name)
                    .ok_or_else(|| Error::field_not_found(name))?;
                Ok(ProjectedField {
                    name: field.name_arc().clone(),
                    desc: field.type_desc(),
                    nullable: field.is_nullable(),
                    schema_pos: pos,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ReadProjection {
            schema,
            fields: fields.into(),
            materialize_rows: false,
            lookup: Arc::new(OnceLock::new()),
        })
    }

    /// Creates a projection of every schema column as typed fields, in
    /// schema order.
    pub fn all_columns(schema: Schema) -> ReadProjection {
        let names: Vec<Arc<str>> = schema
            .fields()
            .iter()
            .map(|field| field.name_arc().clone())
            .collect();
        Self::columns(schema, names.iter().map(|name| name.as_ref()))
            .expect("schema field names project onto themselves")
    }

    /// Creates a whole-row projection: every column is decoded and the
    /// reader materializes complete structured rows.
    pub fn whole_rows(schema: Schema) -> ReadProjection {
        let mut projection = Self::all_columns(schema);
        projection.materialize_rows = true;
        projection
    }

    /// Returns the underlying schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the projected fields in materialization order.
    pub fn fields(&self) -> &[ProjectedField] {
        &self.fields
    }

    /// Returns the number of projected fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are projected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `true` if this projection materializes whole structured rows
    /// instead of typed column vectors.
    pub fn materializes_rows(&self) -> bool {
        self.materialize_rows
    }

    /// Finds the position of a projected field by column name.
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
}

impl std::fmt::Display for ReadProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.materialize_rows {
            write!(f, "rows(")?;
        } else {
            write!(f, "(")?;
        }
        for (i, field) in self.fields.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field.name())?;
        }
        write!(f, ")")
    }
}
