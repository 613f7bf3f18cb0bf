//! ## Crate layout
//! - `core`: runtime schemas, values, coercion, the field policy and `Patch`.
//! - `Patchable` derive: generates the schema and typed setter for a struct.
//! - `json` (feature, default on): records a JSON object onto a `Patch`.
//!
//! The `prelude` module carries the vocabulary needed to declare a model,
//! record changes and apply them.

pub use fieldpatch_core as core;
pub use fieldpatch_derive::Patchable;

// the runtime surface is one module level down, at the paths derive
// expansions refer to
pub use fieldpatch_core::{coerce, config, error, model, obs, patch, policy, traits, value};

#[cfg(feature = "json")]
pub mod json;

// export so derive expansions resolve inside this crate's own tests
extern crate self as fieldpatch;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Identifier types accepted by `Ulid` and `Uuid` fields.
///

pub mod types {
    pub use ulid::Ulid;
    pub use uuid::Uuid;
}

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::{
        Patchable,
        core::{
            config::{ApplyMode, DuplicatePolicy, PatchConfig},
            error::PatchError,
            patch::{ApplyReport, Patch, RecordOutcome},
            traits::{FieldValue as _, FieldValues as _, Patchable as _, Path as _},
            value::Value,
        },
        types::{Ulid, Uuid},
    };
}
