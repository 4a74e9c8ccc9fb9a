//! Council consensus domain
//!
//! Several independent judges each cast a [`Vote`]; the [`ConsensusEngine`]
//! reduces one round of votes to a single [`CouncilDecision`] under the
//! configured [`ConsensusMode`].
//!
//! ```text
//! Judges ──► Vec<Vote> ──► ConsensusEngine::decide(votes, CouncilConfig)
//!                                   │
//!                                   ▼
//!                           CouncilDecision ──► (optional) veto gate
//! ```
//!
//! Ranked preferences cannot be expressed by approve/reject votes; they use
//! [`RankedBallot`] and [`tally_ranked_choice`] instead.

pub mod config;
pub mod decision;
pub mod engine;
pub mod mode;
pub mod parsing;
pub mod ranked;
pub mod vote;

pub use config::CouncilConfig;
pub use decision::CouncilDecision;
pub use engine::{ConsensusEngine, weighted_consensus};
pub use mode::ConsensusMode;
pub use parsing::parse_verdict;
pub use ranked::{RankedBallot, RankedChoiceResult, RunoffRound, tally_ranked_choice};
pub use vote::Vote;
