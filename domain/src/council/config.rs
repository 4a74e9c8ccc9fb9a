//! Council configuration
//!
//! Selects the consensus mode and names the supervisors that hold special
//! authority under the lead-based modes.

use super::mode::ConsensusMode;
use super::vote::Vote;
use crate::core::error::ConsensusError;
use serde::{Deserialize, Serialize};

/// Configuration for one council
///
/// # Example
///
/// ```
/// use council_domain::council::{ConsensusMode, CouncilConfig};
///
/// let config = CouncilConfig::new(ConsensusMode::CeoVeto)
///     .with_lead("judge-2")
///     .with_fallbacks(["judge-1"]);
/// assert_eq!(config.lead_supervisor.as_deref(), Some("judge-2"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CouncilConfig {
    /// Aggregation algorithm
    pub mode: ConsensusMode,
    /// Approval threshold for `supermajority` and `weighted`
    pub threshold: Option<f64>,
    /// Supervisor with special authority under `ceo-*` modes
    pub lead_supervisor: Option<String>,
    /// Ordered stand-ins when the lead did not vote
    pub fallback_supervisors: Vec<String>,
}

impl CouncilConfig {
    pub fn new(mode: ConsensusMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_lead(mut self, lead: impl Into<String>) -> Self {
        self.lead_supervisor = Some(lead.into());
        self
    }

    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_supervisors = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    /// Reject a configured threshold outside `0..=1` (NaN included)
    pub fn validate(&self) -> Result<(), ConsensusError> {
        match self.threshold {
            Some(threshold) if !(0.0..=1.0).contains(&threshold) => {
                Err(ConsensusError::InvalidThreshold(threshold))
            }
            _ => Ok(()),
        }
    }

    /// Threshold in effect: configured value, else the mode's default
    pub fn effective_threshold(&self) -> Option<f64> {
        self.threshold.or_else(|| self.mode.default_threshold())
    }

    /// Find the supervisor acting as lead for this round
    ///
    /// Returns the configured lead if it voted, otherwise the first fallback
    /// supervisor (in configured order) that voted. The returned opinion is
    /// `true` only if every vote cast by that supervisor approves, so the
    /// result does not depend on vote order.
    pub fn acting_lead(&self, votes: &[Vote]) -> Option<(String, bool)> {
        self.lead_supervisor
            .iter()
            .chain(self.fallback_supervisors.iter())
            .find_map(|id| opinion_of(id, votes).map(|approved| (id.clone(), approved)))
    }
}

fn opinion_of(supervisor: &str, votes: &[Vote]) -> Option<bool> {
    let mut cast = votes.iter().filter(|v| v.supervisor == supervisor).peekable();
    cast.peek()?;
    Some(cast.all(|v| v.approved))
}
