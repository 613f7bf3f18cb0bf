use crate::{
    coerce::coerce,
    config::ApplyMode,
    error::PatchError,
    model::ModelSchema,
    obs::{PatchEvent, Stage, sink},
    patch::change::{ChangeRecord, ChangeSet},
    policy::{DropReason, Eligibility, FieldPolicy},
    traits::Patchable,
    value::Value,
};

///
/// ApplyReport
/// Fields written and skipped by one `apply` call.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ApplyReport {
    pub written: Vec<&'static str>,
    pub skipped: Vec<(&'static str, DropReason)>,
}

impl ApplyReport {
    #[must_use]
    pub fn wrote(&self, field: &str) -> bool {
        self.written.iter().any(|name| name.eq_ignore_ascii_case(field))
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }
}

///
/// Step
///

enum Step {
    Write(&'static str, Value),
    Skip(&'static str, DropReason),
}

/// Apply every eligible change to `destination` under the given mode.
pub(crate) fn apply_changes<T: Patchable>(
    changes: &ChangeSet,
    mode: ApplyMode,
    destination: &mut T,
) -> Result<ApplyReport, PatchError> {
    let schema = T::schema();
    let policy = FieldPolicy::new(schema);

    let result = match mode {
        ApplyMode::Partial => apply_partial(changes, &policy, destination),
        ApplyMode::Atomic => apply_atomic(changes, &policy, destination),
    };

    match &result {
        Ok(report) => {
            tracing::debug!(
                model = schema.path(),
                written = report.written.len(),
                skipped = report.skipped.len(),
                "applied patch"
            );
            sink::record(PatchEvent::Applied {
                model_path: schema.path(),
                written: report.written.len() as u64,
                skipped: report.skipped.len() as u64,
            });
        }
        Err(err) => report_failure(schema, err),
    }

    result
}

fn apply_partial<T: Patchable>(
    changes: &ChangeSet,
    policy: &FieldPolicy<'_>,
    destination: &mut T,
) -> Result<ApplyReport, PatchError> {
    let mut report = ApplyReport::default();

    for record in changes {
        let step = prepare(record, policy)?;
        execute(step, destination, &mut report)?;
    }

    Ok(report)
}

fn apply_atomic<T: Patchable>(
    changes: &ChangeSet,
    policy: &FieldPolicy<'_>,
    destination: &mut T,
) -> Result<ApplyReport, PatchError> {
    let steps = changes
        .iter()
        .map(|record| prepare(record, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = ApplyReport::default();
    for step in steps {
        execute(step, destination, &mut report)?;
    }

    Ok(report)
}

// Re-check eligibility, then coerce into the declared kind.
fn prepare(record: &ChangeRecord, policy: &FieldPolicy<'_>) -> Result<Step, PatchError> {
    let descriptor = record.descriptor;

    if let Eligibility::Dropped(reason) = policy.check(descriptor, &record.raw) {
        tracing::debug!(
            field = descriptor.name,
            reason = %reason,
            "skipping patch field at apply"
        );
        sink::record(PatchEvent::Dropped {
            model_path: policy.schema().path(),
            field: descriptor.name,
            reason,
            stage: Stage::Apply,
        });

        return Ok(Step::Skip(descriptor.name, reason));
    }

    let value = coerce(&record.raw, &descriptor.kind)
        .map_err(|err| PatchError::coercion(descriptor.name, err))?;

    Ok(Step::Write(descriptor.name, value))
}

fn execute<T: Patchable>(
    step: Step,
    destination: &mut T,
    report: &mut ApplyReport,
) -> Result<(), PatchError> {
    match step {
        Step::Write(field, value) => {
            destination.set_value(field, value)?;
            report.written.push(field);
        }
        Step::Skip(field, reason) => report.skipped.push((field, reason)),
    }

    Ok(())
}

fn report_failure(schema: &ModelSchema, err: &PatchError) {
    tracing::debug!(model = schema.path(), error = %err, "patch apply failed");

    let field = err
        .field()
        .and_then(|name| schema.field(name))
        .map_or("", |descriptor| descriptor.name);

    sink::record(PatchEvent::ApplyFailed {
        model_path: schema.path(),
        field,
        class: err.class(),
    });
}
