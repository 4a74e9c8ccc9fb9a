//! Veto events as structured `tracing` records.

use council_application::VetoNotifier;
use council_domain::VetoEvent;
use tracing::{info, warn};

/// Logs every veto event; reminders and expirations at `warn`
pub struct TracingVetoNotifier;

impl VetoNotifier for TracingVetoNotifier {
    fn notify(&self, event: &VetoEvent) {
        let request = event.request();
        match event {
            VetoEvent::Reminder { remaining_ms, .. } => warn!(
                request_id = %request.id,
                task = %request.task_description,
                remaining_ms = *remaining_ms,
                "Veto window closing soon"
            ),
            VetoEvent::Expired { .. } => warn!(
                request_id = %request.id,
                task = %request.task_description,
                council_approved = request.decision.approved,
                "Veto window expired; council decision stands"
            ),
            VetoEvent::Extended { additional_ms, .. } => info!(
                request_id = %request.id,
                additional_ms = *additional_ms,
                expires_at = %request.expires_at,
                "Veto window extended"
            ),
            _ => info!(
                request_id = %request.id,
                event = event.event_type(),
                status = %request.status,
                "Veto event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_tracing;
    use chrono::Utc;
    use council_domain::{ConsensusEngine, CouncilConfig, VetoRequest, Vote};
    use std::time::Duration;

    #[test]
    fn test_logs_every_event_kind() {
        init_tracing(2);
        let decision =
            ConsensusEngine::decide(vec![Vote::reject("a", "no")], &CouncilConfig::default())
                .unwrap();
        let request = VetoRequest::new("r", decision, "t", Utc::now(), Duration::from_secs(1));

        let events = [
            VetoEvent::Created {
                request: request.clone(),
            },
            VetoEvent::Reminder {
                request: request.clone(),
                remaining_ms: 1,
            },
            VetoEvent::Extended {
                request: request.clone(),
                additional_ms: 500,
            },
            VetoEvent::Expired { request },
        ];
        for event in &events {
            TracingVetoNotifier.notify(event);
        }
    }
}
