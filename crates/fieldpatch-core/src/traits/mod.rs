use crate::{
    error::PatchError,
    model::{FieldKind, ModelSchema},
    value::Value,
};
use ulid::Ulid;
use uuid::Uuid;

// ============================================================================
// MODEL CONTRACTS
// ============================================================================
//
// These traits are what a model type exposes to the patch pipeline.
// `#[derive(Patchable)]` implements both for named-field structs.
//

///
/// Path
/// Fully-qualified model path.
///

pub trait Path {
    const PATH: &'static str;
}

///
/// FieldValues
///
/// Read access to model fields by name, as `Value`s.
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

///
/// Patchable
///
/// Schema provider and typed setter for one model type.
///
/// ## Contract
/// - `schema()` returns the same cached schema on every call
/// - `set_value` receives values already coerced into the field's declared
///   kind, addressed by the descriptor's declared name
///

pub trait Patchable: FieldValues + Path + Sized {
    fn schema() -> &'static ModelSchema;

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PatchError>;
}

// ============================================================================
// FIELD VALUES
// ============================================================================

///
/// FieldValue
///
/// Conversion boundary between one field type and `Value`.
/// `kind()` is the declared kind the schema records for fields of this type.
///

pub trait FieldValue {
    fn kind() -> FieldKind
    where
        Self: Sized;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn kind() -> FieldKind {
        FieldKind::Text
    }

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::optional(T::kind())
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl<T: FieldValue> FieldValue for Box<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: &Value) -> Option<Self> {
        T::from_value(value).map(Self::new)
    }
}

// impl_field_value
macro_rules! impl_field_value {
    ( $( $type:ty => $variant:ident, $kind:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldKind {
                    FieldKind::$kind
                }

                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value!(
    i8 => Int, Int8,
    i16 => Int, Int16,
    i32 => Int, Int32,
    i64 => Int, Int64,
    u8 => Uint, Uint8,
    u16 => Uint, Uint16,
    u32 => Uint, Uint32,
    u64 => Uint, Uint64,
    bool => Bool, Bool,
    f32 => Float32, Float32,
    f64 => Float64, Float64,
    Ulid => Ulid, Ulid,
    Uuid => Uuid, Uuid,
);

// Pointer-sized integers patch as their 64-bit kind; the setter narrows.
macro_rules! impl_field_value_pointer_sized {
    ( $( $type:ty => $variant:ident, $kind:ident, $wide:ty ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                fn kind() -> FieldKind {
                    FieldKind::$kind
                }

                fn to_value(&self) -> Value {
                    Value::$variant(*self as $wide)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_field_value_pointer_sized!(
    isize => Int, Int64, i64,
    usize => Uint, Uint64, u64,
);

///
/// TESTS
///
