//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ConsensusError`]: failures while reducing votes
//! - [`error::VetoError`]: illegal veto transitions and lookups
//! - [`error::JudgeConfigError`]: unresolvable judge configuration

pub mod error;
