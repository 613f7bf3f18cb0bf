use crate::{error::ErrorClass, model::FieldKind, value::ValueTag};
use thiserror::Error as ThisError;

///
/// CoercionError
///
/// Failures converting a raw value into a declared field kind.
/// Conversion is deterministic, so none of these are worth retrying
/// without changing the input.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum CoercionError {
    #[error("malformed {kind} identifier: '{input}'")]
    MalformedIdentifier { kind: FieldKind, input: String },

    #[error("cannot convert {actual} into {expected}")]
    Incompatible {
        expected: FieldKind,
        actual: ValueTag,
    },

    #[error("cannot convert text '{input}' into {expected}")]
    UnparsableText { expected: FieldKind, input: String },

    #[error("value {value} is out of range for {expected}")]
    OutOfRange { expected: FieldKind, value: String },

    #[error("value {value} has a fractional part and cannot become {expected}")]
    NotIntegral { expected: FieldKind, value: String },
}

impl CoercionError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MalformedIdentifier { .. } => ErrorClass::Format,
            Self::Incompatible { .. }
            | Self::UnparsableText { .. }
            | Self::OutOfRange { .. }
            | Self::NotIntegral { .. } => ErrorClass::Conversion,
        }
    }

    /// Declared kind the coercion was aiming for.
    #[must_use]
    pub const fn expected(&self) -> &FieldKind {
        match self {
            Self::MalformedIdentifier { kind, .. } => kind,
            Self::Incompatible { expected, .. }
            | Self::UnparsableText { expected, .. }
            | Self::OutOfRange { expected, .. }
            | Self::NotIntegral { expected, .. } => expected,
        }
    }
}
