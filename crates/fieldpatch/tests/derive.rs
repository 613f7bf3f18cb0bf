use fieldpatch::{
    error::PatchError,
    model::FieldKind,
    policy::DropReason,
    prelude::*,
    traits::{FieldValues, Patchable as PatchableModel, Path},
};

#[derive(Clone, Debug, Default, PartialEq, Patchable)]
struct Settings {
    #[patch(rename = "displayName")]
    display_name: String,
    #[patch(skip)]
    cache: Vec<u8>,
    volume: u8,
    ratio: f32,
    #[patch(ignore, ignore_null)]
    audit_note: Option<String>,
    r#type: Option<String>,
}

#[test]
fn path_is_module_qualified() {
    assert_eq!(Settings::PATH, concat!(module_path!(), "::Settings"));
    assert_eq!(Settings::schema().path(), Settings::PATH);
}

#[test]
fn schema_lists_declared_kinds() {
    let schema = Settings::schema();

    assert_eq!(schema.len(), 5);
    assert_eq!(
        schema.field("DISPLAYNAME").map(|field| &field.kind),
        Some(&FieldKind::Text)
    );
    assert_eq!(
        schema.field("volume").map(|field| &field.kind),
        Some(&FieldKind::Uint8)
    );
    assert_eq!(
        schema.field("type").map(|field| &field.kind),
        Some(&FieldKind::optional(FieldKind::Text))
    );
    assert!(schema.field("cache").is_none());
    assert!(schema.field("display_name").is_none());
}

#[test]
fn schema_is_built_once() {
    assert!(std::ptr::eq(Settings::schema(), Settings::schema()));
}

#[test]
fn markers_are_carried_into_descriptors() {
    let note = Settings::schema().field("audit_note").expect("audit_note is declared");

    assert!(note.ignore);
    assert!(note.ignore_null);
}

#[test]
fn renamed_fields_patch_under_their_new_name() {
    let mut patch = Patch::<Settings>::new();

    assert_eq!(
        patch.record_change("display_name", "x"),
        Ok(RecordOutcome::Unknown)
    );
    assert_eq!(
        patch.record_change("displayname", "Night mode"),
        Ok(RecordOutcome::Recorded)
    );

    let mut settings = Settings::default();
    patch.apply(&mut settings).expect("apply should succeed");

    assert_eq!(settings.display_name, "Night mode");
    assert_eq!(
        settings.get_value("displayName"),
        Some(Value::from("Night mode"))
    );
}

#[test]
fn skipped_fields_are_unknown_to_patches() {
    let mut patch = Patch::<Settings>::new();

    assert_eq!(patch.record_change("cache", "abc"), Ok(RecordOutcome::Unknown));
    assert_eq!(Settings::default().get_value("cache"), None);
}

#[test]
fn ignore_takes_precedence_over_ignore_null() {
    let mut patch = Patch::<Settings>::new();

    assert_eq!(
        patch.record_change("audit_note", "hello"),
        Ok(RecordOutcome::Dropped(DropReason::Ignored))
    );
    assert_eq!(
        patch.record_change("audit_note", Value::Null),
        Ok(RecordOutcome::Dropped(DropReason::Ignored))
    );
}

#[test]
fn raw_identifiers_use_their_plain_name() {
    let mut settings = Settings::default();
    let patch = Patch::<Settings>::from_pairs([("type", "compact")]).expect("record type");

    patch.apply(&mut settings).expect("apply should succeed");

    assert_eq!(settings.r#type.as_deref(), Some("compact"));
}

#[test]
fn numeric_fields_are_range_checked() {
    let mut settings = Settings::default();

    let ok = Patch::<Settings>::from_pairs([("volume", Value::from("11")), ("ratio", Value::from(0.5))])
        .expect("record numbers");
    ok.apply(&mut settings).expect("apply should succeed");
    assert_eq!(settings.volume, 11);
    assert!((settings.ratio - 0.5).abs() < f32::EPSILON);

    let loud = Patch::<Settings>::from_pairs([("volume", 300)]).expect("record volume");
    let err = loud.apply(&mut settings).expect_err("300 does not fit u8");
    assert!(matches!(err, PatchError::Coercion { .. }));
    assert_eq!(settings.volume, 11);
}

#[test]
fn setter_rejects_values_outside_the_declared_kind() {
    let mut settings = Settings::default();

    let err = settings
        .set_value("volume", Value::from("loud"))
        .expect_err("setter expects an unsigned integer");
    assert!(matches!(err, PatchError::FieldWrite { .. }));

    let err = settings
        .set_value("cache", Value::Null)
        .expect_err("skipped fields have no setter");
    assert!(matches!(err, PatchError::UnknownField { .. }));
}

#[derive(Clone, Debug, Default, PartialEq, Patchable)]
struct Page {
    offset: usize,
    delta: isize,
    #[patch(skip)]
    checksum: u128,
}

#[test]
fn pointer_sized_fields_are_patchable() {
    assert_eq!(
        Page::schema().field("offset").map(|field| &field.kind),
        Some(&FieldKind::Uint64)
    );

    let patch = Patch::<Page>::from_pairs([("offset", Value::from("40")), ("delta", Value::from(-3))])
        .expect("record page fields");
    let mut page = Page::default();
    patch.apply(&mut page).expect("apply should succeed");

    assert_eq!(page.offset, 40);
    assert_eq!(page.delta, -3);
    assert_eq!(page.checksum, 0);
}
