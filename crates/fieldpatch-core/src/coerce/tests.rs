use crate::{
    coerce::{CoercionError, coerce},
    error::ErrorClass,
    model::FieldKind,
    value::{Value, ValueTag},
};
use proptest::prelude::*;
use ulid::Ulid;
use uuid::Uuid;

// ---- helpers -----------------------------------------------------------

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn opt(kind: FieldKind) -> FieldKind {
    FieldKind::optional(kind)
}

// ---- unsupported / optional ---------------------------------------------

#[test]
fn unsupported_kind_coerces_to_null() {
    assert_eq!(coerce(&text("anything"), &FieldKind::Unsupported), Ok(Value::Null));
    assert_eq!(coerce(&Value::Int(3), &FieldKind::Unsupported), Ok(Value::Null));
}

#[test]
fn optional_null_short_circuits() {
    assert_eq!(coerce(&Value::Null, &opt(FieldKind::Int32)), Ok(Value::Null));
    assert_eq!(coerce(&Value::Null, &opt(FieldKind::Ulid)), Ok(Value::Null));
}

#[test]
fn optional_unwraps_into_inner_kind() {
    assert_eq!(coerce(&text("42"), &opt(FieldKind::Int32)), Ok(Value::Int(42)));
    assert_eq!(
        coerce(&text("not-a-number"), &opt(FieldKind::Int32)),
        Err(CoercionError::UnparsableText {
            expected: FieldKind::Int32,
            input: "not-a-number".to_string(),
        })
    );
}

#[test]
fn null_into_required_kind_is_incompatible() {
    let err = coerce(&Value::Null, &FieldKind::Text).expect_err("null into text should fail");

    assert_eq!(
        err,
        CoercionError::Incompatible {
            expected: FieldKind::Text,
            actual: ValueTag::Null,
        }
    );
    assert_eq!(err.class(), ErrorClass::Conversion);
}

// ---- identifiers --------------------------------------------------------

#[test]
fn ulid_parses_canonical_text() {
    let id = Ulid::from_parts(1_700_000_000_000, 99);
    let coerced = coerce(&Value::Text(id.to_string()), &FieldKind::Ulid);

    assert_eq!(coerced, Ok(Value::Ulid(id)));
}

#[test]
fn uuid_parses_canonical_text_with_whitespace() {
    let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
    let coerced = coerce(&Value::Text(format!("  {id}  ")), &FieldKind::Uuid);

    assert_eq!(coerced, Ok(Value::Uuid(id)));
}

#[test]
fn malformed_identifier_is_a_format_error() {
    for kind in [FieldKind::Ulid, FieldKind::Uuid] {
        let err = coerce(&text("not-an-id"), &kind).expect_err("malformed id should fail");

        assert_eq!(err.class(), ErrorClass::Format);
        assert_eq!(
            err,
            CoercionError::MalformedIdentifier {
                kind: kind.clone(),
                input: "not-an-id".to_string(),
            }
        );
    }
}

#[test]
fn parsed_identifier_passes_through_but_other_kind_does_not() {
    let ulid = Ulid::from_parts(5, 5);

    assert_eq!(coerce(&Value::Ulid(ulid), &FieldKind::Ulid), Ok(Value::Ulid(ulid)));
    assert_eq!(
        coerce(&Value::Ulid(ulid), &FieldKind::Uuid),
        Err(CoercionError::Incompatible {
            expected: FieldKind::Uuid,
            actual: ValueTag::Ulid,
        })
    );
}

#[test]
fn non_text_identifier_input_is_incompatible() {
    let err = coerce(&Value::Int(7), &FieldKind::Ulid).expect_err("int into ulid should fail");

    assert_eq!(err.class(), ErrorClass::Conversion);
}

// ---- numbers ------------------------------------------------------------

#[test]
fn integers_narrow_with_range_checks() {
    assert_eq!(coerce(&Value::Int(127), &FieldKind::Int8), Ok(Value::Int(127)));
    assert_eq!(
        coerce(&Value::Int(128), &FieldKind::Int8),
        Err(CoercionError::OutOfRange {
            expected: FieldKind::Int8,
            value: "128".to_string(),
        })
    );
    assert!(coerce(&Value::Int(-1), &FieldKind::Uint32).is_err());
    assert_eq!(coerce(&Value::Uint(300), &FieldKind::Uint16), Ok(Value::Uint(300)));
}

#[test]
fn text_parses_into_integers_across_signedness() {
    assert_eq!(coerce(&text(" -12 "), &FieldKind::Int64), Ok(Value::Int(-12)));
    assert_eq!(
        coerce(&text("18446744073709551615"), &FieldKind::Uint64),
        Ok(Value::Uint(u64::MAX))
    );
    assert!(matches!(
        coerce(&text("4.5"), &FieldKind::Int32),
        Err(CoercionError::UnparsableText { .. })
    ));
}

#[test]
fn floats_become_integers_only_when_integral() {
    assert_eq!(coerce(&Value::Float64(4.0), &FieldKind::Int32), Ok(Value::Int(4)));
    assert_eq!(
        coerce(&Value::Float64(4.5), &FieldKind::Int32),
        Err(CoercionError::NotIntegral {
            expected: FieldKind::Int32,
            value: "4.5".to_string(),
        })
    );
    assert!(matches!(
        coerce(&Value::Float64(f64::NAN), &FieldKind::Int32),
        Err(CoercionError::OutOfRange { .. })
    ));
}

#[test]
fn numbers_widen_into_floats() {
    assert_eq!(coerce(&Value::Int(-3), &FieldKind::Float64), Ok(Value::Float64(-3.0)));
    assert_eq!(coerce(&Value::Uint(8), &FieldKind::Float32), Ok(Value::Float32(8.0)));
    assert_eq!(coerce(&text("2.5"), &FieldKind::Float64), Ok(Value::Float64(2.5)));
    assert_eq!(coerce(&Value::Bool(true), &FieldKind::Float64), Ok(Value::Float64(1.0)));
}

#[test]
fn single_precision_floats_widen_and_narrow() {
    assert_eq!(coerce(&Value::Float32(1.5), &FieldKind::Float64), Ok(Value::Float64(1.5)));
    assert_eq!(coerce(&Value::Float32(6.0), &FieldKind::Uint16), Ok(Value::Uint(6)));
    assert!(matches!(
        coerce(&Value::Float32(6.25), &FieldKind::Int64),
        Err(CoercionError::NotIntegral { .. })
    ));
    assert_eq!(coerce(&Value::Bool(false), &FieldKind::Float32), Ok(Value::Float32(0.0)));
}

#[test]
fn finite_values_too_large_for_f32_are_out_of_range() {
    assert!(matches!(
        coerce(&Value::Float64(1e300), &FieldKind::Float32),
        Err(CoercionError::OutOfRange { .. })
    ));
}

// ---- bool / text --------------------------------------------------------

#[test]
fn booleans_accept_text_and_numbers() {
    assert_eq!(coerce(&text("TRUE"), &FieldKind::Bool), Ok(Value::Bool(true)));
    assert_eq!(coerce(&text(" false"), &FieldKind::Bool), Ok(Value::Bool(false)));
    assert_eq!(coerce(&Value::Int(0), &FieldKind::Bool), Ok(Value::Bool(false)));
    assert_eq!(coerce(&Value::Uint(2), &FieldKind::Bool), Ok(Value::Bool(true)));
    assert!(matches!(
        coerce(&text("yes"), &FieldKind::Bool),
        Err(CoercionError::UnparsableText { .. })
    ));
}

#[test]
fn booleans_become_zero_or_one() {
    assert_eq!(coerce(&Value::Bool(true), &FieldKind::Uint8), Ok(Value::Uint(1)));
    assert_eq!(coerce(&Value::Bool(false), &FieldKind::Int16), Ok(Value::Int(0)));
}

#[test]
fn scalars_render_into_text() {
    let id = Uuid::nil();

    assert_eq!(coerce(&Value::Int(9), &FieldKind::Text), Ok(text("9")));
    assert_eq!(coerce(&Value::Bool(true), &FieldKind::Text), Ok(text("true")));
    assert_eq!(coerce(&Value::Uuid(id), &FieldKind::Text), Ok(Value::Text(id.to_string())));
    assert_eq!(coerce(&text("Alice"), &FieldKind::Text), Ok(text("Alice")));
}

// ---- properties ---------------------------------------------------------

proptest! {
    #[test]
    fn any_i32_text_round_trips_into_int32(n in any::<i32>()) {
        prop_assert_eq!(
            coerce(&Value::Text(n.to_string()), &FieldKind::Int32),
            Ok(Value::Int(i64::from(n)))
        );
    }

    #[test]
    fn int64_values_outside_i16_are_rejected(n in any::<i64>()) {
        let result = coerce(&Value::Int(n), &FieldKind::Int16);
        let fits = i16::try_from(n).is_ok();

        prop_assert_eq!(result.is_ok(), fits);
    }

    #[test]
    fn coercion_is_deterministic(n in any::<i64>(), s in "[a-z0-9 ]{0,12}") {
        for raw in [Value::Int(n), Value::Text(s.clone())] {
            for kind in [FieldKind::Int32, FieldKind::Text, FieldKind::Bool, FieldKind::Uint8] {
                prop_assert_eq!(coerce(&raw, &kind), coerce(&raw, &kind));
            }
        }
    }
}
