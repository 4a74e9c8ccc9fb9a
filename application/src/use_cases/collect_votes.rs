//! Collect Votes use case
//!
//! Polls every judge of a round concurrently and turns each reply into a
//! [`Vote`]. A slow or failing judge never blocks the others: its failure is
//! recorded and the remaining votes are returned.

use crate::ports::judge::{Judge, JudgeError};
use council_domain::{ChatMessage, Vote, parse_verdict};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Errors that abort a whole collection round
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectVotesError {
    #[error("No judges configured")]
    NoJudges,
}

/// Input for the CollectVotes use case
#[derive(Debug, Clone)]
pub struct CollectVotesInput {
    /// Conversation sent verbatim to every judge
    pub conversation: Vec<ChatMessage>,
    /// Upper bound on a single judge's reply, retries included
    pub judge_timeout: Option<Duration>,
}

impl CollectVotesInput {
    pub fn new(conversation: Vec<ChatMessage>) -> Self {
        Self {
            conversation,
            judge_timeout: None,
        }
    }

    pub fn with_judge_timeout(mut self, timeout: Duration) -> Self {
        self.judge_timeout = Some(timeout);
        self
    }
}

/// One judge that produced no vote
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeFailure {
    pub judge: String,
    pub error: JudgeError,
}

/// Votes gathered in one round
#[derive(Debug, Clone, Default)]
pub struct CollectedVotes {
    pub votes: Vec<Vote>,
    pub failures: Vec<JudgeFailure>,
}

impl CollectedVotes {
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}

/// Use case for polling a council of judges
pub struct CollectVotesUseCase {
    judges: Vec<Arc<dyn Judge>>,
}

impl CollectVotesUseCase {
    pub fn new(judges: Vec<Arc<dyn Judge>>) -> Self {
        Self { judges }
    }

    pub async fn execute(
        &self,
        input: CollectVotesInput,
    ) -> Result<CollectedVotes, CollectVotesError> {
        if self.judges.is_empty() {
            return Err(CollectVotesError::NoJudges);
        }

        info!("Collecting votes from {} judges", self.judges.len());

        let conversation: Arc<[ChatMessage]> = input.conversation.into();
        let mut join_set = JoinSet::new();
        let mut task_judges = HashMap::with_capacity(self.judges.len());

        for judge in &self.judges {
            let name = judge.name().to_string();
            let judge = Arc::clone(judge);
            let conversation = Arc::clone(&conversation);
            let timeout = input.judge_timeout;

            let handle = join_set.spawn(async move {
                let result = Self::ask_judge(judge.as_ref(), &conversation, timeout).await;
                (judge, result)
            });
            task_judges.insert(handle.id(), name);
        }

        let mut collected = CollectedVotes::default();

        while let Some(result) = join_set.join_next_with_id().await {
            match result {
                Ok((_, (judge, Ok(reply)))) => {
                    let vote = parse_verdict(judge.name(), &reply).with_weight(judge.weight());
                    info!(
                        judge = judge.name(),
                        approved = vote.approved,
                        confidence = vote.confidence,
                        "Judge voted"
                    );
                    collected.votes.push(vote);
                }
                Ok((_, (judge, Err(error)))) => {
                    warn!(judge = judge.name(), "Judge failed: {}", error);
                    collected.failures.push(JudgeFailure {
                        judge: judge.name().to_string(),
                        error,
                    });
                }
                Err(e) => {
                    let judge = task_judges
                        .remove(&e.id())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    warn!(judge = %judge, "Judge task aborted: {}", e);
                    collected.failures.push(JudgeFailure {
                        judge,
                        error: JudgeError::Aborted(e.to_string()),
                    });
                }
            }
        }

        Ok(collected)
    }

    async fn ask_judge(
        judge: &dyn Judge,
        conversation: &[ChatMessage],
        timeout: Option<Duration>,
    ) -> Result<String, JudgeError> {
        if !judge.is_available().await {
            return Err(JudgeError::Configuration(format!(
                "judge {} is not available",
                judge.name()
            )));
        }

        match timeout {
            Some(limit) => tokio::time::timeout(limit, judge.chat(conversation))
                .await
                .map_err(|_| JudgeError::Timeout)?,
            None => judge.chat(conversation).await,
        }
    }
}
