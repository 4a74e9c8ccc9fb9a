//! Domain layer for judge-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! Several judges vote on one task; the [`ConsensusEngine`] turns the votes
//! into a single accountable [`CouncilDecision`] under a [`ConsensusMode`].
//!
//! ## Veto
//!
//! A [`VetoRequest`] gives a human operator a bounded window to override a
//! decision before it takes effect.
//!
//! ## Judge
//!
//! [`JudgeConfig`] describes one participant; the provider profile table
//! fills in endpoint, model and credential defaults.

pub mod council;
pub mod core;
pub mod judge;
pub mod veto;

// Re-export commonly used types
pub use core::error::{ConsensusError, JudgeConfigError, VetoError};
pub use council::{
    ConsensusEngine, ConsensusMode, CouncilConfig, CouncilDecision, RankedBallot,
    RankedChoiceResult, Vote, parse_verdict, tally_ranked_choice,
};
pub use judge::{
    ChatMessage, JudgeConfig, ProviderKind, ProviderProfile, ResolvedJudge, RetryPolicy, Role,
    chat_completions_url,
};
pub use veto::{Resolution, VetoEvent, VetoRequest, VetoStats, VetoStatus};
