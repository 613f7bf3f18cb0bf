//! Core runtime for fieldpatch: model schemas, values, the field policy,
//! the type coercer, and the `Patch` change tracker that ties them together.

// public exports are one module level down
pub mod coerce;
pub mod config;
pub mod error;
pub mod model;
pub mod obs;
pub mod patch;
pub mod policy;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or coercion helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        config::PatchConfig,
        model::{FieldDescriptor, FieldKind, ModelSchema},
        patch::Patch,
        traits::{FieldValue, FieldValues, Patchable, Path},
        value::Value,
    };
}

