//! Event sink boundary.
//!
//! Patch logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through PatchEvent and EventSink.
use crate::{error::ErrorClass, obs::metrics, policy::DropReason};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

///
/// Stage
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Record,
    Apply,
}

///
/// PatchEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PatchEvent {
    Recorded {
        model_path: &'static str,
        field: &'static str,
        replaced: bool,
    },
    Dropped {
        model_path: &'static str,
        field: &'static str,
        reason: DropReason,
        stage: Stage,
    },
    UnknownField {
        model_path: &'static str,
    },
    Applied {
        model_path: &'static str,
        written: u64,
        skipped: u64,
    },
    ApplyFailed {
        model_path: &'static str,
        field: &'static str,
        class: ErrorClass,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: PatchEvent);
}

/// GlobalEventSink
/// Default thread-local sink that writes into the metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: PatchEvent) {
        match event {
            PatchEvent::Recorded {
                model_path,
                replaced,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.recorded = m.ops.recorded.saturating_add(1);
                    if replaced {
                        m.ops.replaced = m.ops.replaced.saturating_add(1);
                    }

                    let entry = m.models.entry(model_path.to_string()).or_default();
                    entry.recorded = entry.recorded.saturating_add(1);
                });
            }

            PatchEvent::Dropped {
                model_path,
                reason,
                stage,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    match stage {
                        Stage::Record => {
                            m.ops.dropped_on_record = m.ops.dropped_on_record.saturating_add(1);
                        }
                        Stage::Apply => {
                            m.ops.dropped_on_apply = m.ops.dropped_on_apply.saturating_add(1);
                        }
                    }
                    match reason {
                        DropReason::Ignored => m.ops.ignored = m.ops.ignored.saturating_add(1),
                        DropReason::Excluded => m.ops.excluded = m.ops.excluded.saturating_add(1),
                        DropReason::NullIgnored => {
                            m.ops.null_ignored = m.ops.null_ignored.saturating_add(1);
                        }
                    }

                    let entry = m.models.entry(model_path.to_string()).or_default();
                    entry.dropped = entry.dropped.saturating_add(1);
                });
            }

            PatchEvent::UnknownField { model_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.unknown_fields = m.ops.unknown_fields.saturating_add(1);
                    let entry = m.models.entry(model_path.to_string()).or_default();
                    entry.unknown_fields = entry.unknown_fields.saturating_add(1);
                });
            }

            PatchEvent::Applied {
                model_path,
                written,
                ..
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.apply_calls = m.ops.apply_calls.saturating_add(1);
                    m.ops.fields_written = m.ops.fields_written.saturating_add(written);

                    let entry = m.models.entry(model_path.to_string()).or_default();
                    entry.apply_calls = entry.apply_calls.saturating_add(1);
                    entry.fields_written = entry.fields_written.saturating_add(written);
                });
            }

            PatchEvent::ApplyFailed { model_path, .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.apply_failures = m.ops.apply_failures.saturating_add(1);
                    let entry = m.models.entry(model_path.to_string()).or_default();
                    entry.apply_failures = entry.apply_failures.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_EVENT_SINK: GlobalEventSink = GlobalEventSink;

pub(crate) fn record(event: PatchEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_EVENT_SINK.record(event),
    }
}

/// Snapshot the current thread's event counters.
#[must_use]
pub fn event_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset the current thread's event counters.
pub fn event_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary event sink override.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
