use std::fmt;

///
/// FieldKind
///
/// Declared type of a patchable field.
/// Aligned with `Value` variants; integer widths are kept so coercion can
/// range-check before the value reaches the model setter.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FieldKind {
    // Scalar primitives
    Bool,
    Float32,
    Float64,
    Int8,
    Int16,
    Int32,
    Int64,
    Text,
    Uint8,
    Uint16,
    Uint32,
    Uint64,

    // Opaque identifiers, parsed from their canonical text form
    Ulid,
    Uuid,

    /// Nullable wrapper; `Null` short-circuits, anything else coerces into
    /// the inner kind.
    Optional(Box<Self>),

    /// Marker for fields with no declared coercion target.
    Unsupported,
}

impl FieldKind {
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Returns true for the opaque-identifier kinds.
    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Ulid | Self::Uuid)
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strip every `Optional` wrapper.
    #[must_use]
    pub fn innermost(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.innermost(),
            other => other,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Int8 => "i8",
            Self::Int16 => "i16",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Text => "text",
            Self::Uint8 => "u8",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Ulid => "ulid",
            Self::Uuid => "uuid",
            Self::Optional(inner) => return write!(f, "optional<{inner}>"),
            Self::Unsupported => "unsupported",
        };

        f.write_str(label)
    }
}

///
/// FieldDescriptor
/// Runtime field metadata consumed by the patch pipeline.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldDescriptor {
    /// Field name as declared on the model.
    pub name: &'static str,
    /// Declared type shape.
    pub kind: FieldKind,
    /// Never patchable, whatever the value.
    pub ignore: bool,
    /// Patchable only with a non-null value.
    pub ignore_null: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            ignore: false,
            ignore_null: false,
        }
    }

    #[must_use]
    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    #[must_use]
    pub fn ignore_null(mut self) -> Self {
        self.ignore_null = true;
        self
    }

    /// Case-folded name used as the schema and change-set key.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(self.name)
    }
}

/// Case-fold a field name for lookups.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    if name.is_ascii() {
        return name.to_ascii_lowercase();
    }

    name.to_lowercase()
}

///
/// TESTS
///
