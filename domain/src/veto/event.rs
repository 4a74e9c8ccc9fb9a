//! Veto lifecycle notifications

use super::request::VetoRequest;
use serde::Serialize;

/// Something observable happened to a veto request
///
/// Each variant carries a snapshot of the request taken right after the
/// change, so observers never need to read back into the manager.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VetoEvent {
    Created {
        request: VetoRequest,
    },
    Resolved {
        request: VetoRequest,
    },
    Reminder {
        request: VetoRequest,
        remaining_ms: u64,
    },
    Expired {
        request: VetoRequest,
    },
    Extended {
        request: VetoRequest,
        additional_ms: u64,
    },
    Deleted {
        request: VetoRequest,
    },
}

impl VetoEvent {
    /// Event type identifier (e.g., "created", "reminder")
    pub fn event_type(&self) -> &'static str {
        match self {
            VetoEvent::Created { .. } => "created",
            VetoEvent::Resolved { .. } => "resolved",
            VetoEvent::Reminder { .. } => "reminder",
            VetoEvent::Expired { .. } => "expired",
            VetoEvent::Extended { .. } => "extended",
            VetoEvent::Deleted { .. } => "deleted",
        }
    }

    /// Snapshot of the request this event concerns
    pub fn request(&self) -> &VetoRequest {
        match self {
            VetoEvent::Created { request }
            | VetoEvent::Resolved { request }
            | VetoEvent::Reminder { request, .. }
            | VetoEvent::Expired { request }
            | VetoEvent::Extended { request, .. }
            | VetoEvent::Deleted { request } => request,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request().id
    }
}
