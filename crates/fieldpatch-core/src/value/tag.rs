use crate::value::Value;
use std::fmt;

///
/// ValueTag
///
/// Stable value-variant tag used by error messages and event reports.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueTag {
    Bool,
    Float32,
    Float64,
    Int,
    Null,
    Text,
    Uint,
    Ulid,
    Uuid,
}

impl ValueTag {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int => "Int",
            Self::Null => "Null",
            Self::Text => "Text",
            Self::Uint => "Uint",
            Self::Ulid => "Ulid",
            Self::Uuid => "Uuid",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Bool(_) => ValueTag::Bool,
        Value::Float32(_) => ValueTag::Float32,
        Value::Float64(_) => ValueTag::Float64,
        Value::Int(_) => ValueTag::Int,
        Value::Null => ValueTag::Null,
        Value::Text(_) => ValueTag::Text,
        Value::Uint(_) => ValueTag::Uint,
        Value::Ulid(_) => ValueTag::Ulid,
        Value::Uuid(_) => ValueTag::Uuid,
    }
}
