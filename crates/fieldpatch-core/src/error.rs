use crate::{coerce::CoercionError, value::ValueTag};
use std::fmt;
use thiserror::Error as ThisError;

///
/// PatchError
///
/// Structured failures raised while recording or applying a patch.
/// Unknown and excluded fields are never errors; they are dropped.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum PatchError {
    #[error("patch destination is missing")]
    NullDestination,

    #[error("field '{field}' is already recorded on this patch")]
    DuplicateField { field: String },

    #[error("patch apply failed at {field}: {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },

    #[error("model {path} rejected a {actual} value for field '{field}'")]
    FieldWrite {
        path: &'static str,
        field: String,
        actual: ValueTag,
    },

    #[error("model {path} has no writable field '{field}'")]
    UnknownField { path: &'static str, field: String },
}

impl PatchError {
    /// Wrap a coercion failure with the field it happened on.
    #[must_use]
    pub fn coercion(field: impl Into<String>, source: CoercionError) -> Self {
        Self::Coercion {
            field: field.into(),
            source,
        }
    }

    /// Construct a setter rejection for a value of the wrong shape.
    #[must_use]
    pub fn field_write(path: &'static str, field: impl Into<String>, actual: ValueTag) -> Self {
        Self::FieldWrite {
            path,
            field: field.into(),
            actual,
        }
    }

    /// Construct a setter rejection for a field the model does not expose.
    #[must_use]
    pub fn unknown_field(path: &'static str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            path,
            field: field.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NullDestination => ErrorClass::Argument,
            Self::DuplicateField { .. } => ErrorClass::Conflict,
            Self::Coercion { source, .. } => source.class(),
            Self::FieldWrite { .. } | Self::UnknownField { .. } => ErrorClass::Internal,
        }
    }

    /// Return the field the error is attached to, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::NullDestination => None,
            Self::DuplicateField { field }
            | Self::Coercion { field, .. }
            | Self::FieldWrite { field, .. }
            | Self::UnknownField { field, .. } => Some(field.as_str()),
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Error taxonomy for caller-side classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Argument,
    Format,
    Conversion,
    Conflict,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Argument => "argument",
            Self::Format => "format",
            Self::Conversion => "conversion",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
