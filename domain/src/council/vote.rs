//! Vote types for council consensus
//!
//! This module defines the voting primitive produced by one judge in one
//! debate round.

use serde::{Deserialize, Serialize};

/// A single vote from a supervisor in a council round
///
/// `weight` is a static, config-time influence multiplier taken from the
/// supervisor's configuration. `confidence` is the certainty the supervisor
/// reported for this particular decision.
///
/// # Example
///
/// ```
/// use council_domain::council::Vote;
///
/// let approval = Vote::approve("judge-1", "The migration is reversible.");
/// assert!(approval.approved);
///
/// let rejection = Vote::reject("judge-2", "No rollback plan.").with_confidence(0.9);
/// assert!(!rejection.approved);
/// assert_eq!(rejection.confidence, 0.9);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Supervisor identifier (e.g., "judge-1", "claude")
    pub supervisor: String,
    /// Whether this supervisor approved
    pub approved: bool,
    /// Self-reported certainty (0.0 to 1.0)
    pub confidence: f64,
    /// Static influence multiplier (non-negative)
    pub weight: f64,
    /// Reasoning or feedback from this supervisor
    pub comment: String,
}

impl Vote {
    /// Create a new vote with full confidence and unit weight
    pub fn new(supervisor: impl Into<String>, approved: bool, comment: impl Into<String>) -> Self {
        Self {
            supervisor: supervisor.into(),
            approved,
            confidence: 1.0,
            weight: 1.0,
            comment: comment.into(),
        }
    }

    /// Create an approval vote
    pub fn approve(supervisor: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::new(supervisor, true, comment)
    }

    /// Create a rejection vote
    pub fn reject(supervisor: impl Into<String>, comment: impl Into<String>) -> Self {
        Self::new(supervisor, false, comment)
    }

    /// Set the confidence level, clamped into `0.0..=1.0`
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the static weight; negative or NaN weights become zero
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = if weight.is_nan() { 0.0 } else { weight.max(0.0) };
        self
    }

    /// Effective influence of this vote in weighted tallies
    ///
    /// Fields are public, so out-of-range values set directly are
    /// sanitized here rather than trusted.
    pub fn influence(&self) -> f64 {
        let weight = if self.weight.is_finite() {
            self.weight.max(0.0)
        } else {
            0.0
        };
        let confidence = if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 1.0)
        };
        weight * confidence
    }
}
