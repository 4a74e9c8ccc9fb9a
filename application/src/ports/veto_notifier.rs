//! Port for veto lifecycle notifications.
//!
//! Observers receive every [`VetoEvent`] after the state change has been
//! committed. `notify` is synchronous and cannot fail.

use council_domain::VetoEvent;

/// Observer of veto lifecycle events
pub trait VetoNotifier: Send + Sync {
    fn notify(&self, event: &VetoEvent);
}

/// No-op implementation for tests and when notifications are disabled.
pub struct NoVetoNotifier;

impl VetoNotifier for NoVetoNotifier {
    fn notify(&self, _event: &VetoEvent) {}
}
