//! Govern Decision use case
//!
//! Reduces one round of votes to a [`CouncilDecision`] and, when a veto
//! window is requested, hands the decision to the [`VetoManager`] so a
//! human operator can override it before it takes effect.

use super::veto_manager::VetoManager;
use council_domain::{
    ConsensusEngine, ConsensusError, CouncilConfig, CouncilDecision, VetoError, VetoRequest,
    VetoStatus, Vote,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while governing a decision
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GovernError {
    #[error("Consensus error: {0}")]
    Consensus(#[from] ConsensusError),

    #[error("Veto error: {0}")]
    Veto(#[from] VetoError),

    #[error("Veto window requested but no veto manager is configured")]
    NoVetoManager,
}

/// Input for the GovernDecision use case
#[derive(Debug, Clone)]
pub struct GovernDecisionInput {
    pub votes: Vec<Vote>,
    pub council: CouncilConfig,
    pub task_description: String,
    /// Open a veto window; `Some(None)` uses the policy's default timeout
    pub veto_window: Option<Option<Duration>>,
}

impl GovernDecisionInput {
    pub fn new(votes: Vec<Vote>, council: CouncilConfig, task: impl Into<String>) -> Self {
        Self {
            votes,
            council,
            task_description: task.into(),
            veto_window: None,
        }
    }

    /// Open a veto window with the policy's default timeout
    pub fn with_veto(mut self) -> Self {
        self.veto_window = Some(None);
        self
    }

    pub fn with_veto_timeout(mut self, timeout: Duration) -> Self {
        self.veto_window = Some(Some(timeout));
        self
    }
}

/// Council decision plus the human override state, if any
#[derive(Debug, Clone, PartialEq)]
pub struct GovernedDecision {
    pub decision: CouncilDecision,
    pub veto: Option<VetoRequest>,
}

impl GovernedDecision {
    /// Whether the decision is settled and no longer awaiting a human
    pub fn is_final(&self) -> bool {
        self.veto
            .as_ref()
            .is_none_or(|request| request.status.is_terminal())
    }

    /// Outcome after the veto window
    ///
    /// An approved or expired veto lets the council decision stand; a
    /// rejected veto overturns it. `None` while the window is still open.
    pub fn effective_approval(&self) -> Option<bool> {
        match self.veto.as_ref().map(|request| request.status) {
            None | Some(VetoStatus::Approved) | Some(VetoStatus::Expired) => {
                Some(self.decision.approved)
            }
            Some(VetoStatus::Rejected) => Some(!self.decision.approved),
            Some(VetoStatus::Pending) => None,
        }
    }
}

/// Use case for turning votes into a governed decision
pub struct GovernDecisionUseCase {
    veto: Option<Arc<VetoManager>>,
}

impl GovernDecisionUseCase {
    pub fn new() -> Self {
        Self { veto: None }
    }

    pub fn with_veto_manager(mut self, manager: Arc<VetoManager>) -> Self {
        self.veto = Some(manager);
        self
    }

    /// Decide and optionally open a veto window, without waiting on it
    pub fn execute(&self, input: GovernDecisionInput) -> Result<GovernedDecision, GovernError> {
        let decision = ConsensusEngine::decide(input.votes, &input.council)?;
        info!(
            mode = %decision.mode,
            approved = decision.approved,
            consensus = decision.consensus,
            "Council decided {}",
            decision.vote_summary()
        );

        let veto = match input.veto_window {
            Some(timeout) => {
                let manager = self.veto.as_ref().ok_or(GovernError::NoVetoManager)?;
                Some(manager.create(decision.clone(), input.task_description, timeout)?)
            }
            None => None,
        };

        Ok(GovernedDecision { decision, veto })
    }

    /// Decide, open the veto window if requested, and wait for it to close
    pub async fn execute_and_wait(
        &self,
        input: GovernDecisionInput,
    ) -> Result<GovernedDecision, GovernError> {
        let mut governed = self.execute(input)?;
        if let (Some(manager), Some(request)) = (self.veto.as_ref(), governed.veto.as_ref()) {
            let resolved = manager.wait_for_resolution(&request.id, None).await?;
            governed.veto = Some(resolved);
        }
        Ok(governed)
    }
}

impl Default for GovernDecisionUseCase {
    fn default() -> Self {
        Self::new()
    }
}
