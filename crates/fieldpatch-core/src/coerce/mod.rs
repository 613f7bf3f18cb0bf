//! Value coercion into declared field kinds.
//!
//! `coerce` is pure: it never touches a model, it only decides what value a
//! field of the given kind would receive. Rules, in order:
//!
//! 1. `Unsupported` kinds coerce everything to `Null`.
//! 2. Identifier kinds parse canonical text (surrounding whitespace is
//!    trimmed); an already-parsed identifier of the same kind passes through.
//! 3. `Optional(T)` maps `Null` to `Null` and recurses into `T` otherwise.
//! 4. Scalars convert through `num-traits` casts with range checks. Text
//!    parses as a number or a case-insensitive `true`/`false`; floats only
//!    become integers when they have no fractional part; numbers become
//!    booleans by comparing against zero.
mod error;

#[cfg(test)]
mod tests;

use crate::{model::FieldKind, value::Value};
use ulid::Ulid;
use uuid::Uuid;

// re-exports
pub use error::CoercionError;

/// Convert `raw` into the representation required by `kind`.
pub fn coerce(raw: &Value, kind: &FieldKind) -> Result<Value, CoercionError> {
    match kind {
        FieldKind::Unsupported => Ok(Value::Null),

        FieldKind::Ulid | FieldKind::Uuid => coerce_identifier(raw, kind),

        FieldKind::Optional(inner) => {
            if raw.is_null() {
                Ok(Value::Null)
            } else {
                coerce(raw, inner)
            }
        }

        FieldKind::Bool => to_bool(raw, kind).map(Value::Bool),
        FieldKind::Float32 => to_f32(raw, kind).map(Value::Float32),
        FieldKind::Float64 => to_f64(raw, kind).map(Value::Float64),
        FieldKind::Int8 => to_integer::<i8>(raw, kind).map(|v| Value::Int(v.into())),
        FieldKind::Int16 => to_integer::<i16>(raw, kind).map(|v| Value::Int(v.into())),
        FieldKind::Int32 => to_integer::<i32>(raw, kind).map(|v| Value::Int(v.into())),
        FieldKind::Int64 => to_integer::<i64>(raw, kind).map(Value::Int),
        FieldKind::Text => to_text(raw, kind).map(Value::Text),
        FieldKind::Uint8 => to_integer::<u8>(raw, kind).map(|v| Value::Uint(v.into())),
        FieldKind::Uint16 => to_integer::<u16>(raw, kind).map(|v| Value::Uint(v.into())),
        FieldKind::Uint32 => to_integer::<u32>(raw, kind).map(|v| Value::Uint(v.into())),
        FieldKind::Uint64 => to_integer::<u64>(raw, kind).map(Value::Uint),
    }
}

///
/// IDENTIFIERS
///

fn coerce_identifier(raw: &Value, kind: &FieldKind) -> Result<Value, CoercionError> {
    match (kind, raw) {
        (FieldKind::Ulid, Value::Ulid(id)) => Ok(Value::Ulid(*id)),
        (FieldKind::Uuid, Value::Uuid(id)) => Ok(Value::Uuid(*id)),

        (FieldKind::Ulid, Value::Text(s)) => Ulid::from_string(s.trim())
            .map(Value::Ulid)
            .map_err(|_| malformed(kind, s)),
        (FieldKind::Uuid, Value::Text(s)) => Uuid::parse_str(s.trim())
            .map(Value::Uuid)
            .map_err(|_| malformed(kind, s)),

        _ => Err(incompatible(raw, kind)),
    }
}

///
/// SCALARS
///

fn to_bool(raw: &Value, kind: &FieldKind) -> Result<bool, CoercionError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Int(i) => Ok(*i != 0),
        Value::Uint(u) => Ok(*u != 0),
        Value::Float32(f) => Ok(*f != 0.0),
        Value::Float64(f) => Ok(*f != 0.0),
        Value::Text(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if s.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(unparsable(kind, s))
            }
        }
        Value::Null | Value::Ulid(_) | Value::Uuid(_) => Err(incompatible(raw, kind)),
    }
}

fn to_f64(raw: &Value, kind: &FieldKind) -> Result<f64, CoercionError> {
    match raw {
        Value::Float64(f) => Ok(*f),
        Value::Float32(f) => Ok(f64::from(*f)),
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        Value::Int(i) => cast(*i, raw, kind),
        Value::Uint(u) => cast(*u, raw, kind),
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| unparsable(kind, s)),
        Value::Null | Value::Ulid(_) | Value::Uuid(_) => Err(incompatible(raw, kind)),
    }
}

fn to_f32(raw: &Value, kind: &FieldKind) -> Result<f32, CoercionError> {
    match raw {
        Value::Float32(f) => Ok(*f),
        _ => {
            let wide = to_f64(raw, kind)?;
            let narrow: f32 = cast(wide, raw, kind)?;

            // float casts saturate instead of failing
            if wide.is_finite() && !narrow.is_finite() {
                return Err(out_of_range(raw, kind));
            }

            Ok(narrow)
        }
    }
}

fn to_integer<T>(raw: &Value, kind: &FieldKind) -> Result<T, CoercionError>
where
    T: num_traits::NumCast,
{
    match raw {
        Value::Int(i) => cast(*i, raw, kind),
        Value::Uint(u) => cast(*u, raw, kind),
        Value::Bool(b) => cast(u8::from(*b), raw, kind),
        Value::Float32(f) => integral(f64::from(*f), raw, kind),
        Value::Float64(f) => integral(*f, raw, kind),
        Value::Text(s) => {
            // i128 spans both the i64 and u64 ranges
            let wide = s
                .trim()
                .parse::<i128>()
                .map_err(|_| unparsable(kind, s))?;
            cast(wide, raw, kind)
        }
        Value::Null | Value::Ulid(_) | Value::Uuid(_) => Err(incompatible(raw, kind)),
    }
}

fn integral<T>(f: f64, raw: &Value, kind: &FieldKind) -> Result<T, CoercionError>
where
    T: num_traits::NumCast,
{
    if !f.is_finite() {
        return Err(out_of_range(raw, kind));
    }
    if f.fract() != 0.0 {
        return Err(CoercionError::NotIntegral {
            expected: kind.clone(),
            value: raw.to_string(),
        });
    }

    cast(f, raw, kind)
}

fn to_text(raw: &Value, kind: &FieldKind) -> Result<String, CoercionError> {
    match raw {
        Value::Text(s) => Ok(s.clone()),
        Value::Null => Err(incompatible(raw, kind)),
        other => Ok(other.to_string()),
    }
}

///
/// HELPERS
///

fn cast<S, T>(source: S, raw: &Value, kind: &FieldKind) -> Result<T, CoercionError>
where
    S: num_traits::ToPrimitive,
    T: num_traits::NumCast,
{
    T::from(source).ok_or_else(|| out_of_range(raw, kind))
}

fn incompatible(raw: &Value, kind: &FieldKind) -> CoercionError {
    CoercionError::Incompatible {
        expected: kind.clone(),
        actual: raw.tag(),
    }
}

fn unparsable(kind: &FieldKind, input: &str) -> CoercionError {
    CoercionError::UnparsableText {
        expected: kind.clone(),
        input: input.to_string(),
    }
}

fn malformed(kind: &FieldKind, input: &str) -> CoercionError {
    CoercionError::MalformedIdentifier {
        kind: kind.clone(),
        input: input.to_string(),
    }
}

fn out_of_range(raw: &Value, kind: &FieldKind) -> CoercionError {
    CoercionError::OutOfRange {
        expected: kind.clone(),
        value: raw.to_string(),
    }
}
