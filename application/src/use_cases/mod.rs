//! Use cases (application services)
//!
//! - [`CollectVotesUseCase`]: concurrent, failure-isolated judge polling
//! - [`GovernDecisionUseCase`]: consensus plus optional veto window
//! - [`VetoManager`]: veto request lifecycle, sweep and persistence

pub mod collect_votes;
pub mod govern_decision;
pub mod veto_manager;

pub use collect_votes::{
    CollectVotesError, CollectVotesInput, CollectVotesUseCase, CollectedVotes, JudgeFailure,
};
pub use govern_decision::{
    GovernDecisionInput, GovernDecisionUseCase, GovernError, GovernedDecision,
};
pub use veto_manager::{SweepReport, VetoManager, VetoManagerBuilder};
