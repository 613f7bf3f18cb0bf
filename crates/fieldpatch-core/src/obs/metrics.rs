use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory counters for patch operations.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub models: BTreeMap<String, ModelCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Recording
    pub recorded: u64,
    pub replaced: u64,
    pub unknown_fields: u64,
    pub dropped_on_record: u64,

    // Applying
    pub apply_calls: u64,
    pub apply_failures: u64,
    pub fields_written: u64,
    pub dropped_on_apply: u64,

    // Drop reasons
    pub ignored: u64,
    pub excluded: u64,
    pub null_ignored: u64,
}

///
/// ModelCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ModelCounters {
    pub recorded: u64,
    pub dropped: u64,
    pub unknown_fields: u64,
    pub apply_calls: u64,
    pub apply_failures: u64,
    pub fields_written: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the event state.
///

pub type EventReport = EventState;

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|state| f(&mut state.borrow_mut()))
}

pub(crate) fn report() -> EventReport {
    EVENT_STATE.with(|state| state.borrow().clone())
}

pub(crate) fn reset_all() {
    EVENT_STATE.with(|state| *state.borrow_mut() = EventState::default());
}
