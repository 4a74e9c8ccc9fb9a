//! Domain error types

use crate::veto::VetoStatus;
use thiserror::Error;

/// Errors produced while reducing votes to a decision
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    #[error("Insufficient votes: no decision can be derived from an empty vote list")]
    InsufficientVotes,

    #[error("Consensus mode {0} cannot be computed from approve/reject votes")]
    UnsupportedMode(String),

    #[error("Invalid ballot from {voter}: {reason}")]
    InvalidBallot { voter: String, reason: String },

    #[error("Threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),
}

/// Errors produced by the veto workflow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VetoError {
    #[error("Veto request not found: {0}")]
    NotFound(String),

    #[error("Veto request {id} is already {status}")]
    InvalidState { id: String, status: VetoStatus },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Timed out waiting for veto request {0}")]
    WaitTimedOut(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl VetoError {
    /// Check if this error is an illegal transition on a terminal request
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, VetoError::InvalidState { .. })
    }

    /// Check if this error references an unknown request
    pub fn is_not_found(&self) -> bool {
        matches!(self, VetoError::NotFound(_))
    }
}

/// Errors produced while resolving a judge's configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JudgeConfigError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Judge {judge} ({provider}) has no API key; set one of: {}", variables.join(", "))]
    MissingCredentials {
        judge: String,
        provider: String,
        variables: Vec<String>,
    },

    #[error("Judge {0} has an empty base URL")]
    MissingBaseUrl(String),

    #[error("Judge {judge} has invalid temperature {value}")]
    InvalidTemperature { judge: String, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_display() {
        let error = VetoError::InvalidState {
            id: "abc".to_string(),
            status: VetoStatus::Approved,
        };
        assert_eq!(error.to_string(), "Veto request abc is already approved");
        assert!(error.is_invalid_state());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_missing_credentials_lists_variables() {
        let error = JudgeConfigError::MissingCredentials {
            judge: "grok-judge".to_string(),
            provider: "grok".to_string(),
            variables: vec!["GROK_API_KEY".to_string(), "XAI_API_KEY".to_string()],
        };
        assert!(error.to_string().contains("GROK_API_KEY, XAI_API_KEY"));
    }

    #[test]
    fn test_insufficient_votes_display() {
        assert!(
            ConsensusError::InsufficientVotes
                .to_string()
                .starts_with("Insufficient votes")
        );
    }
}
