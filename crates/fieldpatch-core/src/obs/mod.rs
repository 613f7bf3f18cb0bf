//! Observability: per-thread patch counters and sink abstractions.
//!
//! Counters are fed from `PatchEvent`s; `tracing` events are emitted next
//! to the same decision points for log-based inspection.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, ModelCounters};
pub use sink::{EventSink, PatchEvent, Stage, event_report, event_reset_all, with_event_sink};
