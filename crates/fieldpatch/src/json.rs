//! JSON payload adapter.
//!
//! Records the top-level members of a JSON object onto a `Patch`. Scalars
//! map onto `Value`; field names go through `record_change`, so unknown
//! and excluded members are dropped the same way as any other source.

use crate::{
    config::PatchConfig,
    error::PatchError,
    patch::Patch,
    traits::Patchable,
    value::Value,
};
use serde_json::Value as JsonValue;
use thiserror::Error as ThisError;

///
/// JsonPayloadError
///

#[derive(Debug, PartialEq, ThisError)]
pub enum JsonPayloadError {
    #[error("patch payload must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("patch payload member '{field}' holds a nested {found}")]
    Nested { field: String, found: &'static str },

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Build a patch for `T` from a JSON object with the default config.
pub fn patch_from_json<T: Patchable>(payload: &JsonValue) -> Result<Patch<T>, JsonPayloadError> {
    patch_from_json_with(PatchConfig::default(), payload)
}

/// Build a patch for `T` from a JSON object with an explicit config.
pub fn patch_from_json_with<T: Patchable>(
    config: PatchConfig,
    payload: &JsonValue,
) -> Result<Patch<T>, JsonPayloadError> {
    let mut patch = Patch::with_config(config);
    record_json_object(&mut patch, payload)?;

    Ok(patch)
}

///
/// record_json_object
///
/// Record every member of `payload` onto `patch`.
/// Returns how many members the patch kept.
///

pub fn record_json_object<T: Patchable>(
    patch: &mut Patch<T>,
    payload: &JsonValue,
) -> Result<usize, JsonPayloadError> {
    let JsonValue::Object(members) = payload else {
        return Err(JsonPayloadError::NotAnObject {
            found: json_kind(payload),
        });
    };

    let mut kept = 0;
    for (field, member) in members {
        let value = scalar(field, member)?;

        if patch.record_change(field, value)?.is_kept() {
            kept += 1;
        }
    }

    tracing::debug!(
        model = T::PATH,
        members = members.len(),
        kept,
        "recorded json patch payload"
    );

    Ok(kept)
}

fn scalar(field: &str, member: &JsonValue) -> Result<Value, JsonPayloadError> {
    let value = match member {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::Float64)
            }
        }
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            return Err(JsonPayloadError::Nested {
                field: field.to_string(),
                found: json_kind(member),
            });
        }
    };

    Ok(value)
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

///
/// TESTS
///
