//! Consensus modes
//!
//! This module defines the named algorithms used to reduce a round of votes
//! to a single decision.

use serde::{Deserialize, Serialize};

/// Named aggregation algorithm for a council round
///
/// Different modes fit different governance styles:
/// - `SimpleMajority`: more than half must approve (default)
/// - `Supermajority`: more than two thirds (or a configured threshold)
/// - `Unanimous`: every vote approves
/// - `Weighted`: confidence × weight tally against a threshold
/// - `CeoOverride`: the lead supervisor's vote alone decides
/// - `CeoVeto`: majority approves unless the lead rejects
/// - `HybridCeoMajority`: majority decides, the lead breaks exact ties
/// - `RankedChoice`: needs ranked ballots, not boolean votes
///
/// # Example
///
/// ```
/// use council_domain::council::ConsensusMode;
///
/// let mode: ConsensusMode = "ceo-veto".parse().unwrap();
/// assert_eq!(mode, ConsensusMode::CeoVeto);
/// assert!(mode.uses_lead());
/// assert_eq!(mode.to_string(), "ceo-veto");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConsensusMode {
    #[default]
    SimpleMajority,
    Supermajority,
    Unanimous,
    Weighted,
    CeoOverride,
    CeoVeto,
    HybridCeoMajority,
    RankedChoice,
}

impl ConsensusMode {
    /// All modes, in declaration order
    pub const ALL: [ConsensusMode; 8] = [
        ConsensusMode::SimpleMajority,
        ConsensusMode::Supermajority,
        ConsensusMode::Unanimous,
        ConsensusMode::Weighted,
        ConsensusMode::CeoOverride,
        ConsensusMode::CeoVeto,
        ConsensusMode::HybridCeoMajority,
        ConsensusMode::RankedChoice,
    ];

    /// Configuration name of this mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusMode::SimpleMajority => "simple-majority",
            ConsensusMode::Supermajority => "supermajority",
            ConsensusMode::Unanimous => "unanimous",
            ConsensusMode::Weighted => "weighted",
            ConsensusMode::CeoOverride => "ceo-override",
            ConsensusMode::CeoVeto => "ceo-veto",
            ConsensusMode::HybridCeoMajority => "hybrid-ceo-majority",
            ConsensusMode::RankedChoice => "ranked-choice",
        }
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            ConsensusMode::SimpleMajority => "more than half must approve",
            ConsensusMode::Supermajority => "more than two thirds must approve",
            ConsensusMode::Unanimous => "all must approve",
            ConsensusMode::Weighted => "weight x confidence approval above threshold",
            ConsensusMode::CeoOverride => "lead supervisor decides alone",
            ConsensusMode::CeoVeto => "majority approves unless the lead rejects",
            ConsensusMode::HybridCeoMajority => "majority decides, lead breaks ties",
            ConsensusMode::RankedChoice => "instant-runoff over ranked ballots",
        }
    }

    /// Whether this mode grants the lead supervisor special authority
    pub fn uses_lead(&self) -> bool {
        matches!(
            self,
            ConsensusMode::CeoOverride | ConsensusMode::CeoVeto | ConsensusMode::HybridCeoMajority
        )
    }

    /// Default approval threshold for threshold-based modes
    pub fn default_threshold(&self) -> Option<f64> {
        match self {
            ConsensusMode::Supermajority => Some(2.0 / 3.0),
            ConsensusMode::Weighted => Some(0.5),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsensusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConsensusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "simple-majority" | "majority" => Ok(ConsensusMode::SimpleMajority),
            "supermajority" | "super-majority" => Ok(ConsensusMode::Supermajority),
            "unanimous" => Ok(ConsensusMode::Unanimous),
            "weighted" => Ok(ConsensusMode::Weighted),
            "ceo-override" => Ok(ConsensusMode::CeoOverride),
            "ceo-veto" => Ok(ConsensusMode::CeoVeto),
            "hybrid-ceo-majority" => Ok(ConsensusMode::HybridCeoMajority),
            "ranked-choice" => Ok(ConsensusMode::RankedChoice),
            _ => Err(format!(
                "Unknown consensus mode: {}. Valid: {}",
                s,
                ConsensusMode::ALL
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_modes_round_trip_through_display() {
        for mode in ConsensusMode::ALL {
            assert_eq!(mode.to_string().parse::<ConsensusMode>(), Ok(mode));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            "majority".parse::<ConsensusMode>(),
            Ok(ConsensusMode::SimpleMajority)
        );
        assert_eq!(
            "CEO_VETO".parse::<ConsensusMode>(),
            Ok(ConsensusMode::CeoVeto)
        );
    }

    #[test]
    fn test_parse_unknown() {
        let err = "plurality".parse::<ConsensusMode>().unwrap_err();
        assert!(err.contains("Unknown consensus mode"));
        assert!(err.contains("hybrid-ceo-majority"));
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&ConsensusMode::HybridCeoMajority).unwrap();
        assert_eq!(json, "\"hybrid-ceo-majority\"");
        let mode: ConsensusMode = serde_json::from_str("\"ceo-override\"").unwrap();
        assert_eq!(mode, ConsensusMode::CeoOverride);
    }

    #[test]
    fn test_uses_lead() {
        assert!(ConsensusMode::CeoOverride.uses_lead());
        assert!(ConsensusMode::HybridCeoMajority.uses_lead());
        assert!(!ConsensusMode::Weighted.uses_lead());
    }

    #[test]
    fn test_default() {
        assert_eq!(ConsensusMode::default(), ConsensusMode::SimpleMajority);
        assert_eq!(ConsensusMode::Weighted.default_threshold(), Some(0.5));
    }
}
