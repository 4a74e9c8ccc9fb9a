//! Ranked-choice ballots
//!
//! Approve/reject votes cannot express a preference order, so the
//! `ranked-choice` mode works on its own ballot type and an instant-runoff
//! tally.

use crate::core::error::ConsensusError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One voter's preference order over candidate options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBallot {
    pub voter: String,
    /// Candidate ids, most preferred first
    pub ranking: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl RankedBallot {
    pub fn new<I, S>(voter: impl Into<String>, ranking: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            voter: voter.into(),
            ranking: ranking.into_iter().map(Into::into).collect(),
            weight: 1.0,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    fn validate(&self) -> Result<(), ConsensusError> {
        let invalid = |reason: &str| ConsensusError::InvalidBallot {
            voter: self.voter.clone(),
            reason: reason.to_string(),
        };
        if self.ranking.is_empty() {
            return Err(invalid("empty ranking"));
        }
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Err(invalid("weight must be a non-negative number"));
        }
        let mut seen = HashSet::new();
        if !self.ranking.iter().all(|c| seen.insert(c.as_str())) {
            return Err(invalid("candidate ranked more than once"));
        }
        Ok(())
    }

    /// Highest-ranked candidate still in the running
    fn preference<'a>(&'a self, remaining: &BTreeSet<&str>) -> Option<&'a str> {
        self.ranking
            .iter()
            .map(String::as_str)
            .find(|c| remaining.contains(c))
    }
}

/// First-preference tallies for one elimination round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunoffRound {
    pub tallies: BTreeMap<String, f64>,
    pub eliminated: Option<String>,
}

/// Outcome of an instant-runoff tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedChoiceResult {
    pub winner: String,
    pub rounds: Vec<RunoffRound>,
}

/// Instant-runoff tally over ranked ballots
///
/// Each round counts every ballot (by weight) toward its highest-ranked
/// remaining candidate. A candidate holding more than half of the live
/// weight wins; otherwise the lowest tally is eliminated. Among tied
/// lowest candidates the lexicographically greatest id is eliminated, so
/// the result is deterministic.
///
/// # Example
///
/// ```
/// use council_domain::council::{RankedBallot, tally_ranked_choice};
///
/// let ballots = vec![
///     RankedBallot::new("a", ["refactor", "rewrite"]),
///     RankedBallot::new("b", ["rewrite", "refactor"]),
///     RankedBallot::new("c", ["patch", "refactor"]),
/// ];
/// let result = tally_ranked_choice(&ballots).unwrap();
/// assert_eq!(result.winner, "refactor");
/// ```
pub fn tally_ranked_choice(ballots: &[RankedBallot]) -> Result<RankedChoiceResult, ConsensusError> {
    if ballots.is_empty() {
        return Err(ConsensusError::InsufficientVotes);
    }
    for ballot in ballots {
        ballot.validate()?;
    }

    let mut remaining: BTreeSet<&str> = ballots
        .iter()
        .flat_map(|b| b.ranking.iter().map(String::as_str))
        .collect();
    let mut rounds = Vec::new();

    loop {
        let mut tallies: BTreeMap<&str, f64> = remaining.iter().map(|c| (*c, 0.0)).collect();
        for ballot in ballots {
            if let Some(choice) = ballot.preference(&remaining)
                && let Some(count) = tallies.get_mut(choice)
            {
                *count += ballot.weight;
            }
        }
        let live: f64 = tallies.values().sum();

        let leader = tallies
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(c, t)| (c.to_string(), *t));

        let owned: BTreeMap<String, f64> =
            tallies.iter().map(|(c, t)| (c.to_string(), *t)).collect();

        match leader {
            Some((winner, top)) if remaining.len() == 1 || top > live / 2.0 => {
                rounds.push(RunoffRound {
                    tallies: owned,
                    eliminated: None,
                });
                return Ok(RankedChoiceResult { winner, rounds });
            }
            _ => {}
        }

        let loser = tallies
            .iter()
            .min_by(|a, b| a.1.total_cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(c, _)| *c);
        let Some(loser) = loser else {
            return Err(ConsensusError::InsufficientVotes);
        };
        remaining.remove(loser);
        rounds.push(RunoffRound {
            tallies: owned,
            eliminated: Some(loser.to_string()),
        });
    }
}
