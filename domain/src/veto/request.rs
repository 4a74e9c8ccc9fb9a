//! Veto request entity and its state machine
//!
//! ```text
//!            approve ──► Approved
//!           /
//! Pending ──── reject ──► Rejected
//!           \
//!            sweep (now ≥ expires_at) ──► Expired
//! ```
//!
//! Terminal states never transition again.

use crate::council::CouncilDecision;
use crate::core::error::VetoError;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle status of a veto request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VetoStatus {
    Pending,
    Approved,
    Rejected,
    Expired,
}

impl VetoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VetoStatus::Pending => "pending",
            VetoStatus::Approved => "approved",
            VetoStatus::Rejected => "rejected",
            VetoStatus::Expired => "expired",
        }
    }

    /// Check if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VetoStatus::Pending)
    }
}

impl std::fmt::Display for VetoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A human resolution of a pending request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Approve,
    Reject,
}

impl Resolution {
    fn status(self) -> VetoStatus {
        match self {
            Resolution::Approve => VetoStatus::Approved,
            Resolution::Reject => VetoStatus::Rejected,
        }
    }
}

/// Time-bounded human-override wrapper around a [`CouncilDecision`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetoRequest {
    pub id: String,
    pub decision: CouncilDecision,
    pub task_description: String,
    pub requested_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: VetoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Whether the expiry reminder has already fired
    #[serde(default)]
    pub reminder_sent: bool,
}

impl VetoRequest {
    /// Create a pending request expiring `timeout` after `now`
    pub fn new(
        id: impl Into<String>,
        decision: CouncilDecision,
        task_description: impl Into<String>,
        now: DateTime<Utc>,
        timeout: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            decision,
            task_description: task_description.into(),
            requested_at: now,
            expires_at: add_duration(now, timeout),
            status: VetoStatus::Pending,
            resolved_at: None,
            resolved_by: None,
            reason: None,
            reminder_sent: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == VetoStatus::Pending
    }

    fn ensure_pending(&self) -> Result<(), VetoError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(VetoError::InvalidState {
                id: self.id.clone(),
                status: self.status,
            })
        }
    }

    /// Record a human resolution
    ///
    /// Fails with [`VetoError::InvalidState`] on a terminal request and
    /// leaves the earlier resolution untouched.
    pub fn resolve(
        &mut self,
        resolution: Resolution,
        by: impl Into<String>,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), VetoError> {
        self.ensure_pending()?;
        self.status = resolution.status();
        self.resolved_at = Some(now);
        self.resolved_by = Some(by.into());
        self.reason = reason;
        Ok(())
    }

    /// Move to `Expired` if the deadline has passed
    ///
    /// Returns `true` only on the transition itself.
    pub fn expire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_pending() || now < self.expires_at {
            return false;
        }
        self.status = VetoStatus::Expired;
        self.resolved_at = Some(now);
        true
    }

    /// Push the deadline back by `additional`
    pub fn extend(&mut self, additional: Duration) -> Result<DateTime<Utc>, VetoError> {
        self.ensure_pending()?;
        if additional.is_zero() {
            return Err(VetoError::Validation(
                "extension must be greater than zero".to_string(),
            ));
        }
        let extended = add_duration(self.expires_at, additional);
        if extended <= self.expires_at {
            return Err(VetoError::Validation(
                "extension overflows the deadline".to_string(),
            ));
        }
        self.expires_at = extended;
        Ok(extended)
    }

    /// Time left before expiry; zero once the request is no longer pending
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        if !self.is_pending() {
            return Duration::ZERO;
        }
        (self.expires_at - now).to_std().unwrap_or(Duration::ZERO)
    }

    /// Whether the one-shot reminder should fire now
    ///
    /// True when pending, not yet reminded, and the remaining time lies in
    /// `lower..=upper`.
    pub fn reminder_due(&self, now: DateTime<Utc>, lower: Duration, upper: Duration) -> bool {
        if !self.is_pending() || self.reminder_sent || now >= self.expires_at {
            return false;
        }
        let remaining = self.remaining(now);
        remaining >= lower && remaining <= upper
    }

    /// Time from creation to resolution, for terminal requests
    pub fn resolution_time(&self) -> Option<Duration> {
        self.resolved_at
            .and_then(|at| (at - self.requested_at).to_std().ok())
    }
}

fn add_duration(at: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::council::{ConsensusEngine, CouncilConfig, Vote};

    fn request(timeout: Duration) -> (VetoRequest, DateTime<Utc>) {
        let now = Utc::now();
        let decision = ConsensusEngine::decide(
            vec![Vote::approve("a", "ok"), Vote::reject("b", "no"), Vote::approve("c", "ok")],
            &CouncilConfig::default(),
        )
        .unwrap();
        (
            VetoRequest::new("req-1", decision, "deploy service", now, timeout),
            now,
        )
    }

    #[test]
    fn test_new_request_is_pending() {
        let (req, now) = request(Duration::from_secs(300));
        assert!(req.is_pending());
        assert_eq!(req.expires_at - now, TimeDelta::seconds(300));
        assert_eq!(req.remaining(now), Duration::from_secs(300));
    }

    #[test]
    fn test_second_resolution_fails_and_keeps_first() {
        let (mut req, now) = request(Duration::from_secs(60));
        req.resolve(Resolution::Approve, "ops", Some("looks fine".into()), now)
            .unwrap();

        let err = req
            .resolve(Resolution::Reject, "ops2", None, now)
            .unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(req.status, VetoStatus::Approved);
        assert_eq!(req.resolved_by.as_deref(), Some("ops"));
        assert_eq!(req.reason.as_deref(), Some("looks fine"));
    }

    #[test]
    fn test_expire_only_after_deadline() {
        let (mut req, now) = request(Duration::from_millis(100));
        assert!(!req.expire_if_due(now));
        assert!(req.expire_if_due(now + TimeDelta::milliseconds(100)));
        assert_eq!(req.status, VetoStatus::Expired);
        assert!(!req.expire_if_due(now + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_expired_cannot_be_resolved() {
        let (mut req, now) = request(Duration::ZERO);
        assert!(req.expire_if_due(now));
        let err = req.resolve(Resolution::Approve, "ops", None, now).unwrap_err();
        assert_eq!(
            err,
            VetoError::InvalidState {
                id: "req-1".to_string(),
                status: VetoStatus::Expired
            }
        );
    }

    #[test]
    fn test_extend_strictly_increases_deadline() {
        let (mut req, _) = request(Duration::from_secs(60));
        let before = req.expires_at;
        let after = req.extend(Duration::from_secs(30)).unwrap();
        assert_eq!(after - before, TimeDelta::seconds(30));
        assert!(matches!(
            req.extend(Duration::ZERO),
            Err(VetoError::Validation(_))
        ));
    }

    #[test]
    fn test_extend_after_resolution_fails() {
        let (mut req, now) = request(Duration::from_secs(60));
        req.resolve(Resolution::Reject, "ops", None, now).unwrap();
        let before = req.expires_at;
        assert!(req.extend(Duration::from_secs(30)).unwrap_err().is_invalid_state());
        assert_eq!(req.expires_at, before);
    }

    #[test]
    fn test_remaining_is_zero_when_resolved_or_overdue() {
        let (mut req, now) = request(Duration::from_secs(10));
        assert_eq!(req.remaining(now + TimeDelta::seconds(20)), Duration::ZERO);
        req.resolve(Resolution::Approve, "ops", None, now).unwrap();
        assert_eq!(req.remaining(now), Duration::ZERO);
    }

    #[test]
    fn test_reminder_band() {
        let (mut req, now) = request(Duration::from_secs(120));
        let lower = Duration::from_secs(50);
        let upper = Duration::from_secs(60);
        assert!(!req.reminder_due(now, lower, upper));
        assert!(req.reminder_due(now + TimeDelta::seconds(65), lower, upper));
        req.reminder_sent = true;
        assert!(!req.reminder_due(now + TimeDelta::seconds(65), lower, upper));
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let (req, _) = request(Duration::from_secs(u64::MAX));
        assert_eq!(req.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_serde_round_trip_uses_camel_case() {
        let (req, _) = request(Duration::from_secs(60));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("taskDescription").is_some());
        assert!(json.get("resolvedBy").is_none());
        let back: VetoRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, req.id);
        assert_eq!(back.expires_at, req.expires_at);
        assert_eq!(back.decision.votes, req.decision.votes);
    }
}
