//! Veto policy: timing and validation rules for the veto workflow
//!
//! [`VetoPolicy`] holds the static timing parameters of
//! [`VetoManager`](crate::use_cases::veto_manager::VetoManager) together with
//! the rule for mandatory resolution reasons.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing and validation rules for veto requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoPolicy {
    /// Deadline applied when `create` is called without an explicit timeout.
    pub default_timeout: Duration,
    /// Interval of the background expiration sweep.
    pub sweep_interval: Duration,
    /// Lower bound of the reminder band (remaining time).
    pub reminder_min_remaining: Duration,
    /// Upper bound of the reminder band (remaining time).
    pub reminder_max_remaining: Duration,
    /// Reject `approve`/`reject` calls that carry no reason.
    pub require_reason: bool,
    /// Polling interval for `wait_for_resolution`.
    pub poll_interval: Duration,
}

impl Default for VetoPolicy {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(5 * 60),
            sweep_interval: Duration::from_secs(10),
            reminder_min_remaining: Duration::from_secs(50),
            reminder_max_remaining: Duration::from_secs(60),
            require_reason: false,
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl VetoPolicy {
    // ==================== Builder Methods ====================

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    pub fn with_reminder_band(mut self, min_remaining: Duration, max_remaining: Duration) -> Self {
        self.reminder_min_remaining = min_remaining.min(max_remaining);
        self.reminder_max_remaining = max_remaining.max(min_remaining);
        self
    }

    pub fn with_require_reason(mut self, require: bool) -> Self {
        self.require_reason = require;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = VetoPolicy::default();
        assert_eq!(policy.default_timeout, Duration::from_secs(300));
        assert_eq!(policy.sweep_interval, Duration::from_secs(10));
        assert_eq!(policy.reminder_min_remaining, Duration::from_secs(50));
        assert_eq!(policy.reminder_max_remaining, Duration::from_secs(60));
        assert!(!policy.require_reason);
    }

    #[test]
    fn test_reminder_band_is_ordered() {
        let policy = VetoPolicy::default()
            .with_reminder_band(Duration::from_secs(30), Duration::from_secs(10));
        assert_eq!(policy.reminder_min_remaining, Duration::from_secs(10));
        assert_eq!(policy.reminder_max_remaining, Duration::from_secs(30));
    }
}
