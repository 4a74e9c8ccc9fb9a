//! Application-level configuration.
//!
//! - [`VetoPolicy`]: veto deadlines and sweep timing

pub mod veto_policy;

pub use veto_policy::VetoPolicy;
