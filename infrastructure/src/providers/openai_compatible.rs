//! OpenAI-compatible chat-completions judge
//!
//! One implementation serves every [`ProviderKind`](council_domain::ProviderKind):
//! the provider only selects the profile (base URL, default model,
//! credential variables) that was resolved into a [`ResolvedJudge`].

use super::retry::with_retry;
use async_trait::async_trait;
use council_application::{Judge, JudgeError};
use council_domain::{ChatMessage, JudgeConfig, ResolvedJudge, RetryPolicy};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<&'a ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Judge speaking the chat-completions wire protocol over HTTPS
pub struct OpenAiCompatibleJudge {
    judge: ResolvedJudge,
    system_message: Option<ChatMessage>,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl OpenAiCompatibleJudge {
    pub fn new(judge: ResolvedJudge) -> Self {
        let system_message = judge.system_prompt.clone().map(ChatMessage::system);
        Self {
            judge,
            system_message,
            client: reqwest::Client::new(),
            retry: RetryPolicy::default(),
        }
    }

    /// Resolve `config` against the process environment and build the judge
    ///
    /// Fails with [`JudgeError::Configuration`] before any network call when
    /// credentials cannot be resolved.
    pub fn from_config(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let resolved = config.resolve(|name| std::env::var(name).ok())?;
        Ok(Self::new(resolved))
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn resolved(&self) -> &ResolvedJudge {
        &self.judge
    }

    async fn send_once(&self, request: &ChatRequest<'_>) -> Result<String, JudgeError> {
        let mut builder = self.client.post(self.judge.endpoint()).json(request);
        if let Some(key) = &self.judge.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| JudgeError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| {
                JudgeError::InvalidResponse("missing choices[0].message.content".to_string())
            })
    }
}

fn transport_error(error: reqwest::Error) -> JudgeError {
    if error.is_timeout() {
        JudgeError::Timeout
    } else {
        JudgeError::Transport(error.to_string())
    }
}

#[async_trait]
impl Judge for OpenAiCompatibleJudge {
    fn name(&self) -> &str {
        &self.judge.name
    }

    fn weight(&self) -> f64 {
        self.judge.weight
    }

    async fn chat(&self, conversation: &[ChatMessage]) -> Result<String, JudgeError> {
        let messages: Vec<&ChatMessage> = self.system_message.iter().chain(conversation).collect();
        let request = ChatRequest {
            model: &self.judge.model,
            messages,
            temperature: self.judge.temperature,
        };

        debug!(
            judge = %self.judge.name,
            model = %self.judge.model,
            messages = request.messages.len(),
            "Sending chat completion"
        );

        let request = &request;
        with_retry(&self.retry, &self.judge.name, move || self.send_once(request)).await
    }

    async fn is_available(&self) -> bool {
        self.judge.api_key.is_some() || !self.judge.provider.profile().requires_credentials
    }
}
