use crate::model::field::{FieldDescriptor, normalize_name};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Invariant violations raised while assembling a model schema.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("model {path} declares field '{field}' more than once (names are case-insensitive)")]
    DuplicateField { path: &'static str, field: String },

    #[error("model {path} declares an empty field name")]
    EmptyFieldName { path: &'static str },
}

///
/// ModelSchema
///
/// Patch metadata for one model type, built once and shared read-only.
/// Field lookups are case-insensitive; the always-excluded set is applied
/// on top of the per-field markers.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModelSchema {
    path: &'static str,
    fields: BTreeMap<String, FieldDescriptor>,
    excluded: BTreeSet<String>,
}

impl ModelSchema {
    #[must_use]
    pub const fn builder(path: &'static str) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            path,
            fields: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Fully-qualified model path (for diagnostics and event reports).
    #[must_use]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Case-insensitive field lookup.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(&normalize_name(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns true when `name` is in the schema-wide always-excluded set.
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded.contains(&normalize_name(name))
    }

    /// Field descriptors in normalized-name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Normalized names of the always-excluded set.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.excluded.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// ModelSchemaBuilder
///

#[derive(Debug)]
pub struct ModelSchemaBuilder {
    path: &'static str,
    fields: Vec<FieldDescriptor>,
    excluded: Vec<String>,
}

impl ModelSchemaBuilder {
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a name to the always-excluded set.
    ///
    /// The name does not have to match a declared field.
    #[must_use]
    pub fn exclude(mut self, name: impl AsRef<str>) -> Self {
        self.excluded.push(normalize_name(name.as_ref()));
        self
    }

    pub fn build(self) -> Result<ModelSchema, SchemaError> {
        let mut fields = BTreeMap::new();

        for field in self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { path: self.path });
            }

            let key = field.normalized_name();
            if fields.contains_key(&key) {
                return Err(SchemaError::DuplicateField {
                    path: self.path,
                    field: field.name.to_string(),
                });
            }
            fields.insert(key, field);
        }

        Ok(ModelSchema {
            path: self.path,
            fields,
            excluded: self.excluded.into_iter().collect(),
        })
    }
}

///
/// TESTS
///
