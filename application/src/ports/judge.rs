//! Judge port
//!
//! Defines the uniform capability contract every AI-model participant
//! implements. Adapters live in the infrastructure layer.

use async_trait::async_trait;
use council_domain::{ChatMessage, JudgeConfigError};
use thiserror::Error;

/// Errors that can occur while talking to a judge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JudgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Judge timed out")]
    Timeout,

    #[error("Judge task aborted: {0}")]
    Aborted(String),
}

impl JudgeError {
    /// Whether the failure may succeed on a later attempt
    ///
    /// Server errors (5xx), timeouts and transport failures are transient.
    /// Every 4xx status (auth, validation) and configuration problem is not.
    pub fn is_transient(&self) -> bool {
        match self {
            JudgeError::Provider { status, .. } => *status >= 500,
            JudgeError::Transport(_) | JudgeError::Timeout => true,
            JudgeError::Configuration(_)
            | JudgeError::InvalidResponse(_)
            | JudgeError::Aborted(_) => false,
        }
    }
}

impl From<JudgeConfigError> for JudgeError {
    fn from(error: JudgeConfigError) -> Self {
        JudgeError::Configuration(error.to_string())
    }
}

/// One configured AI-model participant
///
/// Implementations are created once per participant and reused across
/// debate rounds.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Display name, also used as the supervisor id on votes
    fn name(&self) -> &str;

    /// Static influence multiplier applied to this judge's votes
    fn weight(&self) -> f64 {
        1.0
    }

    /// Send a conversation and return the reply text
    async fn chat(&self, conversation: &[ChatMessage]) -> Result<String, JudgeError>;

    /// Whether the judge can be called at all (e.g., credentials present)
    async fn is_available(&self) -> bool;
}
