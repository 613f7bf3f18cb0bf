use crate::{
    error::PatchError,
    model::{FieldDescriptor, ModelSchema},
    traits::{FieldValue, FieldValues, Patchable, Path},
    value::Value,
};
use std::sync::LazyLock;
use ulid::Ulid;
use uuid::Uuid;

///
/// Account
///
/// Hand-written model covering every marker the patch pipeline honors.
/// `id` is excluded by the schema, `secret` is always ignored and
/// `nickname` ignores null.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub id: Ulid,
    pub name: String,
    pub age: Option<i32>,
    pub level: u8,
    pub score: f64,
    pub active: bool,
    pub nickname: Option<String>,
    pub secret: String,
    pub external_id: Option<Uuid>,
}

impl Account {
    pub fn new(name: &str) -> Self {
        Self {
            id: Ulid::from_parts(1, 1),
            name: name.to_string(),
            age: None,
            level: 1,
            score: 0.0,
            active: false,
            nickname: Some("nick".to_string()),
            secret: "s3cret".to_string(),
            external_id: None,
        }
    }
}

static ACCOUNT_SCHEMA: LazyLock<ModelSchema> = LazyLock::new(|| {
    ModelSchema::builder(Account::PATH)
        .field(FieldDescriptor::new("id", Ulid::kind()))
        .field(FieldDescriptor::new("Name", String::kind()))
        .field(FieldDescriptor::new("age", <Option<i32>>::kind()))
        .field(FieldDescriptor::new("level", u8::kind()))
        .field(FieldDescriptor::new("score", f64::kind()))
        .field(FieldDescriptor::new("active", bool::kind()))
        .field(FieldDescriptor::new("nickname", <Option<String>>::kind()).ignore_null())
        .field(FieldDescriptor::new("secret", String::kind()).ignored())
        .field(FieldDescriptor::new("external_id", <Option<Uuid>>::kind()))
        .exclude("ID")
        .build()
        .expect("account fixture schema should build")
});

impl Path for Account {
    const PATH: &'static str = "test_fixtures::Account";
}

impl FieldValues for Account {
    fn get_value(&self, field: &str) -> Option<Value> {
        let descriptor = ACCOUNT_SCHEMA.field(field)?;

        Some(match descriptor.name {
            "id" => self.id.to_value(),
            "Name" => self.name.to_value(),
            "age" => self.age.to_value(),
            "level" => self.level.to_value(),
            "score" => self.score.to_value(),
            "active" => self.active.to_value(),
            "nickname" => self.nickname.to_value(),
            "secret" => self.secret.to_value(),
            "external_id" => self.external_id.to_value(),
            _ => return None,
        })
    }
}

impl Patchable for Account {
    fn schema() -> &'static ModelSchema {
        &ACCOUNT_SCHEMA
    }

    fn set_value(&mut self, field: &str, value: Value) -> Result<(), PatchError> {
        match field {
            "id" => assign(&mut self.id, field, &value),
            "Name" => assign(&mut self.name, field, &value),
            "age" => assign(&mut self.age, field, &value),
            "level" => assign(&mut self.level, field, &value),
            "score" => assign(&mut self.score, field, &value),
            "active" => assign(&mut self.active, field, &value),
            "nickname" => assign(&mut self.nickname, field, &value),
            "secret" => assign(&mut self.secret, field, &value),
            "external_id" => assign(&mut self.external_id, field, &value),
            _ => Err(PatchError::unknown_field(Self::PATH, field)),
        }
    }
}

fn assign<F: FieldValue>(slot: &mut F, field: &str, value: &Value) -> Result<(), PatchError> {
    *slot = F::from_value(value)
        .ok_or_else(|| PatchError::field_write(Account::PATH, field, value.tag()))?;

    Ok(())
}
