//! Change tracking and application for one model type.
//!
//! A `Patch<T>` records raw field assignments against `T`'s schema and
//! later writes the eligible ones into a `&mut T`, coercing each value
//! into the field's declared kind on the way.

mod apply;
mod change;


use crate::{
    config::{DuplicatePolicy, PatchConfig},
    error::PatchError,
    model::ModelSchema,
    obs::{PatchEvent, Stage, sink},
    policy::{Eligibility, FieldPolicy},
    traits::Patchable,
    value::Value,
};
use std::{fmt, marker::PhantomData};

// re-exports
pub use apply::ApplyReport;
pub use change::{ChangeRecord, ChangeSet, RecordOutcome};

///
/// Patch
///
/// Recorded, not-yet-applied assignments for model `T`.
/// Recording never touches a destination; `apply` may run any number of
/// times against any number of destinations.
///

pub struct Patch<T: Patchable> {
    changes: ChangeSet,
    config: PatchConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Patchable> Patch<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PatchConfig::default())
    }

    #[must_use]
    pub const fn with_config(config: PatchConfig) -> Self {
        Self {
            changes: ChangeSet::new(),
            config,
            _marker: PhantomData,
        }
    }

    /// Build a patch from `(field, value)` pairs with the default config.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, PatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut patch = Self::new();
        patch.record_all(pairs)?;

        Ok(patch)
    }

    #[must_use]
    pub fn schema(&self) -> &'static ModelSchema {
        T::schema()
    }

    #[must_use]
    pub const fn config(&self) -> &PatchConfig {
        &self.config
    }

    #[must_use]
    pub const fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Forget a recorded change; field lookup is case-insensitive.
    pub fn remove_change(&mut self, field: &str) -> Option<ChangeRecord> {
        self.changes.remove(field)
    }

    ///
    /// record_change
    ///
    /// Record `value` for `field`.
    ///
    /// Unknown names and policy-dropped fields are not errors; the returned
    /// outcome says which path was taken. Only a second record for the same
    /// field under `DuplicatePolicy::Reject` fails.
    ///
    pub fn record_change(
        &mut self,
        field: &str,
        value: impl Into<Value>,
    ) -> Result<RecordOutcome, PatchError> {
        let schema = T::schema();
        let raw = value.into();

        let Some(descriptor) = schema.field(field) else {
            tracing::trace!(model = schema.path(), field, "ignoring unknown patch field");
            sink::record(PatchEvent::UnknownField {
                model_path: schema.path(),
            });

            return Ok(RecordOutcome::Unknown);
        };

        if let Eligibility::Dropped(reason) = FieldPolicy::new(schema).check(descriptor, &raw) {
            tracing::debug!(
                model = schema.path(),
                field = descriptor.name,
                reason = %reason,
                "dropping patch field at record"
            );
            sink::record(PatchEvent::Dropped {
                model_path: schema.path(),
                field: descriptor.name,
                reason,
                stage: Stage::Record,
            });

            return Ok(RecordOutcome::Dropped(reason));
        }

        let record = ChangeRecord { descriptor, raw };
        let replaced = match self.config.duplicates {
            DuplicatePolicy::Reject => {
                self.changes
                    .insert_new(record)
                    .map_err(|rejected| PatchError::DuplicateField {
                        field: rejected.field().to_string(),
                    })?;
                false
            }
            DuplicatePolicy::LastWriteWins => self.changes.upsert(record),
        };

        tracing::trace!(
            model = schema.path(),
            field = descriptor.name,
            replaced,
            "recorded patch field"
        );
        sink::record(PatchEvent::Recorded {
            model_path: schema.path(),
            field: descriptor.name,
            replaced,
        });

        Ok(if replaced {
            RecordOutcome::Replaced
        } else {
            RecordOutcome::Recorded
        })
    }

    /// Record every `(field, value)` pair, stopping at the first error.
    pub fn record_all<I, K, V>(&mut self, pairs: I) -> Result<(), PatchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (field, value) in pairs {
            self.record_change(field.as_ref(), value)?;
        }

        Ok(())
    }

    /// Write every eligible recorded change into `destination`.
    pub fn apply(&self, destination: &mut T) -> Result<ApplyReport, PatchError> {
        apply::apply_changes(&self.changes, self.config.apply_mode, destination)
    }

    /// Optional-destination form of `apply`; `None` is an argument error.
    pub fn apply_to(&self, destination: Option<&mut T>) -> Result<ApplyReport, PatchError> {
        let Some(destination) = destination else {
            tracing::debug!(model = T::schema().path(), "patch destination is missing");
            return Err(PatchError::NullDestination);
        };

        self.apply(destination)
    }
}

impl<T: Patchable> Default for Patch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Patchable> Clone for Patch<T> {
    fn clone(&self) -> Self {
        Self {
            changes: self.changes.clone(),
            config: self.config,
            _marker: PhantomData,
        }
    }
}

impl<T: Patchable> fmt::Debug for Patch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patch")
            .field("model", &T::PATH)
            .field("changes", &self.changes)
            .field("config", &self.config)
            .finish()
    }
}
