//! Field eligibility.
//!
//! The same check runs when a change is recorded and again when it is
//! applied, so a record can never reach a destination unless it passes
//! against the schema at apply time.
use crate::{
    model::{FieldDescriptor, ModelSchema},
    value::Value,
};
use std::fmt;

///
/// DropReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DropReason {
    /// Field carries the always-ignore marker.
    Ignored,
    /// Field is in the schema's always-excluded set.
    Excluded,
    /// Field carries the ignore-if-null marker and the value is null.
    NullIgnored,
}

impl DropReason {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Excluded => "excluded",
            Self::NullIgnored => "null_ignored",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// Eligibility
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Eligibility {
    Eligible,
    Dropped(DropReason),
}

impl Eligibility {
    #[must_use]
    pub const fn is_eligible(self) -> bool {
        matches!(self, Self::Eligible)
    }
}

///
/// FieldPolicy
/// Exclusion rules for one model schema.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldPolicy<'a> {
    schema: &'a ModelSchema,
}

impl<'a> FieldPolicy<'a> {
    #[must_use]
    pub const fn new(schema: &'a ModelSchema) -> Self {
        Self { schema }
    }

    #[must_use]
    pub const fn schema(&self) -> &'a ModelSchema {
        self.schema
    }

    /// Decide whether `raw` may be applied to `descriptor`.
    #[must_use]
    pub fn check(&self, descriptor: &FieldDescriptor, raw: &Value) -> Eligibility {
        if descriptor.ignore {
            return Eligibility::Dropped(DropReason::Ignored);
        }
        if self.schema.is_excluded(descriptor.name) {
            return Eligibility::Dropped(DropReason::Excluded);
        }
        if descriptor.ignore_null && raw.is_null() {
            return Eligibility::Dropped(DropReason::NullIgnored);
        }

        Eligibility::Eligible
    }

    #[must_use]
    pub fn is_eligible(&self, descriptor: &FieldDescriptor, raw: &Value) -> bool {
        self.check(descriptor, raw).is_eligible()
    }
}

///
/// TESTS
///
