//! Runtime patch model definitions.
//!
//! Types in `model` are the runtime form of whatever declared the model
//! (the `Patchable` derive, or a hand-written `ModelSchema::builder` call).
//! They are built once per model type and only read afterwards.
pub mod field;
pub mod schema;

pub use field::{FieldDescriptor, FieldKind, normalize_name};
pub use schema::{ModelSchema, ModelSchemaBuilder, SchemaError};
