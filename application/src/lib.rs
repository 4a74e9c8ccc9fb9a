//! Application layer for judge-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::VetoPolicy;
pub use ports::{
    judge::{Judge, JudgeError},
    veto_notifier::{NoVetoNotifier, VetoNotifier},
    veto_store::VetoStore,
};
pub use use_cases::collect_votes::{
    CollectVotesError, CollectVotesInput, CollectVotesUseCase, CollectedVotes, JudgeFailure,
};
pub use use_cases::govern_decision::{
    GovernDecisionInput, GovernDecisionUseCase, GovernError, GovernedDecision,
};
pub use use_cases::veto_manager::{SweepReport, VetoManager, VetoManagerBuilder};
