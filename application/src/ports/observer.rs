//! Run observer port
//!
//! Progress events for one orchestration run. Implementations live in
//! the presentation layer (console progress bars, UI indicators).

use helpdesk_domain::OrchestratorEvent;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::warn;

/// Observer of one run's event stream
///
/// Callbacks are synchronous and in-process; each state transition is
/// delivered before the emitting stage returns control.
pub trait RunObserver: Send + Sync {
    fn on_event(&self, event: &OrchestratorEvent);
}

/// No-op observer for when progress reporting is not needed
pub struct NullObserver;

impl RunObserver for NullObserver {
    fn on_event(&self, _event: &OrchestratorEvent) {}
}

/// Deliver an event, isolating observer panics
///
/// A misbehaving listener must not abort the run; delivery is
/// best-effort.
pub fn emit(observer: &dyn RunObserver, event: OrchestratorEvent) {
    let delivered = catch_unwind(AssertUnwindSafe(|| observer.on_event(&event)));
    if delivered.is_err() {
        warn!(event = event.name(), "run observer panicked; event dropped");
    }
}
