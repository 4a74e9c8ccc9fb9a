//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod judge;
pub mod veto_notifier;
pub mod veto_store;
