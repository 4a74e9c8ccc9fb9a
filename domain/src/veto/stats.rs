//! Aggregate statistics over veto requests

use super::request::{VetoRequest, VetoStatus};
use serde::{Deserialize, Serialize};

/// Counts per status plus mean time-to-resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetoStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub expired: usize,
    /// Mean milliseconds from creation to a human resolution
    pub average_resolution_ms: Option<f64>,
}

impl VetoStats {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a VetoRequest>) -> Self {
        let mut stats = VetoStats::default();
        let mut resolution_total_ms = 0.0;
        let mut resolved = 0usize;

        for request in requests {
            stats.total += 1;
            match request.status {
                VetoStatus::Pending => stats.pending += 1,
                VetoStatus::Approved => stats.approved += 1,
                VetoStatus::Rejected => stats.rejected += 1,
                VetoStatus::Expired => stats.expired += 1,
            }
            // Expirations are not human decisions and would skew the mean
            if matches!(request.status, VetoStatus::Approved | VetoStatus::Rejected)
                && let Some(elapsed) = request.resolution_time()
            {
                resolution_total_ms += elapsed.as_secs_f64() * 1000.0;
                resolved += 1;
            }
        }

        if resolved > 0 {
            stats.average_resolution_ms = Some(resolution_total_ms / resolved as f64);
        }
        stats
    }

    /// Share of terminal requests that timed out without a human decision
    pub fn expiry_rate(&self) -> f64 {
        let terminal = self.approved + self.rejected + self.expired;
        if terminal == 0 {
            0.0
        } else {
            self.expired as f64 / terminal as f64
        }
    }
}
