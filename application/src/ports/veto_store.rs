//! Veto persistence port
//!
//! Durable snapshots of the veto table. Saving and loading are always
//! explicit; the manager never persists implicitly on mutation.

use council_domain::{VetoError, VetoRequest};

/// Storage for a snapshot of all veto requests
pub trait VetoStore: Send + Sync {
    /// Overwrite the stored snapshot with `requests`
    fn save(&self, requests: &[VetoRequest]) -> Result<(), VetoError>;

    /// Read the stored snapshot
    ///
    /// Returns an empty list when nothing has been saved yet, and
    /// [`VetoError::Persistence`] when the stored data is unreadable.
    fn load(&self) -> Result<Vec<VetoRequest>, VetoError>;
}
