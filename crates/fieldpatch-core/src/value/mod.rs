mod tag;


use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;
use uuid::Uuid;

// re-exports
pub use tag::ValueTag;

///
/// Value
/// Loosely-typed field value crossing the patch boundary.
///
/// Raw values recorded on a patch keep whatever shape the payload produced.
/// Coerced values always carry the variant matching the declared field kind.
///
/// Null → the field's value is absent (`Option::None` on the model).
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Float32(f32),
    Float64(f64),
    Int(i64),
    #[default]
    Null,
    Text(String),
    Uint(u64),
    Ulid(Ulid),
    Uuid(Uuid),
}

impl Value {
    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is one of the numeric variants.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Float32(_) | Self::Float64(_) | Self::Int(_) | Self::Uint(_)
        )
    }

    /// Returns true if the value is one of the opaque identifier variants.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Ulid(_) | Self::Uuid(_))
    }

    /// Stable variant tag used in diagnostics.
    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    ///
    /// CONVERSION
    ///

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_ulid(&self) -> Option<Ulid> {
        if let Self::Ulid(id) = self {
            Some(*id)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_uuid(&self) -> Option<Uuid> {
        if let Self::Uuid(id) = self {
            Some(*id)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::Text(v) => f.write_str(v),
            Self::Uint(v) => write!(f, "{v}"),
            Self::Ulid(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
        }
    }
}

// impl_from_for
macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool   => Bool,
    f32    => Float32,
    f64    => Float64,
    i8     => Int,
    i16    => Int,
    i32    => Int,
    i64    => Int,
    &str   => Text,
    String => Text,
    u8     => Uint,
    u16    => Uint,
    u32    => Uint,
    u64    => Uint,
    Ulid   => Ulid,
    Uuid   => Uuid,
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Null
    }
}
