//! Consensus engine
//!
//! A pure reduction from one round of votes plus a [`CouncilConfig`] to a
//! [`CouncilDecision`]. Results never depend on the order of the input votes.

use super::config::CouncilConfig;
use super::decision::CouncilDecision;
use super::mode::ConsensusMode;
use super::vote::Vote;
use crate::core::error::ConsensusError;

/// Reduces votes to a decision under the configured [`ConsensusMode`]
///
/// # Example
///
/// ```
/// use council_domain::council::{ConsensusEngine, ConsensusMode, CouncilConfig, Vote};
///
/// let votes = vec![
///     Vote::approve("judge-1", "fine"),
///     Vote::reject("judge-2", "risky"),
///     Vote::approve("judge-3", "fine"),
/// ];
/// let config = CouncilConfig::new(ConsensusMode::CeoVeto).with_lead("judge-2");
///
/// let decision = ConsensusEngine::decide(votes, &config).unwrap();
/// assert!(!decision.approved);
/// assert_eq!(decision.dissent, vec!["fine".to_string(), "fine".to_string()]);
/// ```
pub struct ConsensusEngine;

impl ConsensusEngine {
    /// Compute a decision for one round of votes
    pub fn decide(
        votes: Vec<Vote>,
        config: &CouncilConfig,
    ) -> Result<CouncilDecision, ConsensusError> {
        if votes.is_empty() {
            return Err(ConsensusError::InsufficientVotes);
        }
        config.validate()?;

        let tally = Tally::of(&votes);
        let verdict = match config.mode {
            ConsensusMode::SimpleMajority => tally.majority_verdict(),
            ConsensusMode::Supermajority => {
                let threshold = config.effective_threshold().unwrap_or(2.0 / 3.0);
                let approved = tally.ratio() > threshold;
                Verdict::new(
                    approved,
                    format!(
                        "supermajority {} {} {:.2}",
                        tally.fraction(),
                        if approved { "above" } else { "not above" },
                        threshold
                    ),
                )
            }
            ConsensusMode::Unanimous => {
                let rejections = tally.total - tally.approvals;
                if rejections == 0 {
                    Verdict::new(true, format!("unanimous {}", tally.fraction()))
                } else {
                    Verdict::new(false, format!("{} rejection(s)", rejections))
                }
            }
            ConsensusMode::Weighted => match tally.weighted {
                Some(weighted) => {
                    let threshold = config.effective_threshold().unwrap_or(0.5);
                    Verdict::new(
                        weighted > threshold,
                        format!("weighted {:.3} vs threshold {:.2}", weighted, threshold),
                    )
                }
                None => tally
                    .majority_verdict()
                    .prefixed("zero total influence, fell back to"),
            },
            ConsensusMode::CeoOverride => match config.acting_lead(&votes) {
                Some((lead, approved)) => {
                    Verdict::new(approved, format!("lead override by {}", lead))
                }
                None => tally.majority_verdict().prefixed("lead absent,"),
            },
            ConsensusMode::CeoVeto => match config.acting_lead(&votes) {
                Some((lead, false)) => Verdict::new(false, format!("lead veto by {}", lead)),
                Some((lead, true)) => tally
                    .majority_verdict()
                    .suffixed(&format!("lead {} did not veto", lead)),
                None => tally.majority_verdict().prefixed("lead absent,"),
            },
            ConsensusMode::HybridCeoMajority => {
                if tally.is_tie() {
                    match config.acting_lead(&votes) {
                        Some((lead, approved)) => Verdict::new(
                            approved,
                            format!("tie {} broken by lead {}", tally.fraction(), lead),
                        ),
                        None => Verdict::new(
                            false,
                            format!("tie {} with no lead to break it", tally.fraction()),
                        ),
                    }
                } else {
                    tally.majority_verdict()
                }
            }
            ConsensusMode::RankedChoice => {
                return Err(ConsensusError::UnsupportedMode(config.mode.to_string()));
            }
        };

        let dissent = votes
            .iter()
            .filter(|v| v.approved != verdict.approved)
            .map(|v| v.comment.clone())
            .collect();

        let reasoning = format!(
            "{}: {} ({})",
            config.mode,
            if verdict.approved {
                "approved"
            } else {
                "rejected"
            },
            verdict.factor
        );

        Ok(CouncilDecision {
            approved: verdict.approved,
            consensus: tally.ratio(),
            weighted_consensus: tally.weighted,
            votes,
            reasoning,
            dissent,
            mode: config.mode,
        })
    }
}

/// Order-independent counts for one round
struct Tally {
    approvals: usize,
    total: usize,
    weighted: Option<f64>,
}

impl Tally {
    fn of(votes: &[Vote]) -> Self {
        Self {
            approvals: votes.iter().filter(|v| v.approved).count(),
            total: votes.len(),
            weighted: weighted_consensus(votes),
        }
    }

    fn ratio(&self) -> f64 {
        self.approvals as f64 / self.total as f64
    }

    fn fraction(&self) -> String {
        format!("{}/{}", self.approvals, self.total)
    }

    fn is_tie(&self) -> bool {
        2 * self.approvals == self.total
    }

    fn majority_verdict(&self) -> Verdict {
        if 2 * self.approvals > self.total {
            Verdict::new(true, format!("majority {}", self.fraction()))
        } else {
            Verdict::new(false, format!("no majority {}", self.fraction()))
        }
    }
}

struct Verdict {
    approved: bool,
    factor: String,
}

impl Verdict {
    fn new(approved: bool, factor: String) -> Self {
        Self { approved, factor }
    }

    fn prefixed(mut self, prefix: &str) -> Self {
        self.factor = format!("{} {}", prefix, self.factor);
        self
    }

    fn suffixed(mut self, suffix: &str) -> Self {
        self.factor = format!("{}, {}", self.factor, suffix);
        self
    }
}

/// `Σ(weight·confidence·approved) / Σ(weight·confidence)`, or `None` when the
/// denominator is zero
///
/// Terms are summed in sorted order so the floating point result is
/// identical for every permutation of `votes`.
pub fn weighted_consensus(votes: &[Vote]) -> Option<f64> {
    let mut all: Vec<f64> = votes.iter().map(Vote::influence).collect();
    let mut approving: Vec<f64> = votes
        .iter()
        .filter(|v| v.approved)
        .map(Vote::influence)
        .collect();
    all.sort_by(f64::total_cmp);
    approving.sort_by(f64::total_cmp);

    let total: f64 = all.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(approving.iter().sum::<f64>() / total)
}
