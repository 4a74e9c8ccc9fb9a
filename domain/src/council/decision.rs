//! Council decision
//!
//! The immutable outcome of reducing one round of votes.

use super::mode::ConsensusMode;
use super::vote::Vote;
use serde::{Deserialize, Serialize};

/// Aggregated outcome of one council round
///
/// `consensus` is always the unweighted approval ratio, whichever mode
/// decided `approved`. `dissent` holds the comments of votes that disagree
/// with `approved`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilDecision {
    pub approved: bool,
    pub consensus: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_consensus: Option<f64>,
    pub votes: Vec<Vote>,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dissent: Vec<String>,
    /// Mode that produced this decision
    #[serde(default)]
    pub mode: ConsensusMode,
}

impl CouncilDecision {
    /// Number of approving votes
    pub fn approve_count(&self) -> usize {
        self.votes.iter().filter(|v| v.approved).count()
    }

    /// Number of rejecting votes
    pub fn reject_count(&self) -> usize {
        self.votes.len() - self.approve_count()
    }

    /// Whether every vote agreed with the outcome
    pub fn is_unanimous(&self) -> bool {
        self.dissent.is_empty() && self.votes.iter().all(|v| v.approved == self.approved)
    }

    /// Votes that disagree with the outcome
    pub fn dissenting_votes(&self) -> impl Iterator<Item = &Vote> {
        self.votes.iter().filter(move |v| v.approved != self.approved)
    }

    /// Generate a visual vote summary (e.g., "[●●○]")
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        for vote in &self.votes {
            summary.push(if vote.approved { '●' } else { '○' });
        }
        summary.push(']');
        summary
    }
}
