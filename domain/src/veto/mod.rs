//! Veto governance domain
//!
//! A [`VetoRequest`] wraps a council decision in a time-bounded approval
//! window. Its status only moves forward: `pending` to one of `approved`,
//! `rejected` or `expired`.

pub mod event;
pub mod request;
pub mod stats;

pub use event::VetoEvent;
pub use request::{Resolution, VetoRequest, VetoStatus};
pub use stats::VetoStats;
