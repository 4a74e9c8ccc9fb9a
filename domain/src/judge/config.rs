//! Judge identity and configuration resolution
//!
//! Resolution precedence for each setting:
//!
//! 1. Explicit per-judge value (`api_key`, `model`, `base_url`)
//! 2. Provider profile default (`model`, `base_url`)
//! 3. Environment lookup (`api_key` only), primary variable first, then
//!    legacy aliases

use super::provider::ProviderKind;
use crate::core::error::JudgeConfigError;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// One configured judge, as written in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeConfig {
    pub name: String,
    pub provider: ProviderKind,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_weight() -> f64 {
    1.0
}

impl JudgeConfig {
    pub fn new(name: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            name: name.into(),
            provider,
            model: None,
            base_url: None,
            api_key: None,
            temperature: default_temperature(),
            system_prompt: None,
            weight: default_weight(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Resolve against the provider profile and an environment lookup
    ///
    /// `env` is consulted only when no explicit key is configured. Fails
    /// before any network activity when a credential-requiring provider has
    /// no resolvable key.
    pub fn resolve<F>(&self, env: F) -> Result<ResolvedJudge, JudgeConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = self.provider.profile();

        if !(self.temperature.is_finite() && (0.0..=2.0).contains(&self.temperature)) {
            return Err(JudgeConfigError::InvalidTemperature {
                judge: self.name.clone(),
                value: self.temperature,
            });
        }

        let base_url = non_empty(self.base_url.as_deref())
            .unwrap_or(profile.base_url)
            .trim()
            .to_string();
        if base_url.is_empty() {
            return Err(JudgeConfigError::MissingBaseUrl(self.name.clone()));
        }

        let model = non_empty(self.model.as_deref())
            .unwrap_or(profile.default_model)
            .to_string();

        let api_key = match non_empty(self.api_key.as_deref()) {
            Some(key) => Some(key.to_string()),
            None => self
                .provider
                .credential_envs()
                .into_iter()
                .find_map(|var| env(var).filter(|v| !v.trim().is_empty())),
        };

        if api_key.is_none() && profile.requires_credentials {
            return Err(JudgeConfigError::MissingCredentials {
                judge: self.name.clone(),
                provider: self.provider.to_string(),
                variables: self
                    .provider
                    .credential_envs()
                    .into_iter()
                    .map(String::from)
                    .collect(),
            });
        }

        Ok(ResolvedJudge {
            name: self.name.clone(),
            provider: self.provider,
            model,
            base_url,
            api_key,
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
            weight: self.weight.max(0.0),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A judge with every setting resolved; immutable after construction
#[derive(Clone, PartialEq)]
pub struct ResolvedJudge {
    pub name: String,
    pub provider: ProviderKind,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub temperature: f64,
    pub system_prompt: Option<String>,
    pub weight: f64,
}

impl ResolvedJudge {
    /// Full chat-completions URL for this judge
    pub fn endpoint(&self) -> String {
        chat_completions_url(&self.base_url)
    }
}

impl std::fmt::Debug for ResolvedJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedJudge")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("weight", &self.weight)
            .finish()
    }
}

/// Append the chat-completions path unless the base URL already ends with it
///
/// # Example
///
/// ```
/// use council_domain::judge::chat_completions_url;
///
/// assert_eq!(
///     chat_completions_url("https://api.openai.com/v1/"),
///     "https://api.openai.com/v1/chat/completions"
/// );
/// assert_eq!(
///     chat_completions_url("https://proxy.local/v1/chat/completions"),
///     "https://proxy.local/v1/chat/completions"
/// );
/// ```
pub fn chat_completions_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.ends_with(CHAT_COMPLETIONS_PATH) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, CHAT_COMPLETIONS_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values_win() {
        let judge = JudgeConfig::new("j", ProviderKind::OpenAi)
            .with_api_key("explicit")
            .with_model("gpt-4.1")
            .with_base_url("https://proxy.example/v1")
            .resolve(env_of(&[("OPENAI_API_KEY", "from-env")]))
            .unwrap();
        assert_eq!(judge.api_key.as_deref(), Some("explicit"));
        assert_eq!(judge.model, "gpt-4.1");
        assert_eq!(judge.base_url, "https://proxy.example/v1");
    }

    #[test]
    fn test_profile_defaults_then_env() {
        let judge = JudgeConfig::new("j", ProviderKind::Groq)
            .resolve(env_of(&[("GROQ_API_KEY", "gsk")]))
            .unwrap();
        assert_eq!(judge.api_key.as_deref(), Some("gsk"));
        assert_eq!(judge.model, "llama-3.3-70b-versatile");
        assert_eq!(
            judge.endpoint(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn test_grok_accepts_parent_xai_variable() {
        let judge = JudgeConfig::new("j", ProviderKind::Grok)
            .resolve(env_of(&[("XAI_API_KEY", "xai-key")]))
            .unwrap();
        assert_eq!(judge.api_key.as_deref(), Some("xai-key"));
    }

    #[test]
    fn test_primary_variable_precedes_legacy() {
        let judge = JudgeConfig::new("j", ProviderKind::Grok)
            .resolve(env_of(&[("XAI_API_KEY", "legacy"), ("GROK_API_KEY", "primary")]))
            .unwrap();
        assert_eq!(judge.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_missing_credentials_fail_fast() {
        let err = JudgeConfig::new("j", ProviderKind::Anthropic)
            .resolve(env_of(&[]))
            .unwrap_err();
        assert_eq!(
            err,
            JudgeConfigError::MissingCredentials {
                judge: "j".to_string(),
                provider: "anthropic".to_string(),
                variables: vec!["ANTHROPIC_API_KEY".to_string(), "CLAUDE_API_KEY".to_string()],
            }
        );
    }

    #[test]
    fn test_blank_explicit_key_falls_through_to_env() {
        let judge = JudgeConfig::new("j", ProviderKind::OpenAi)
            .with_api_key("  ")
            .resolve(env_of(&[("OPENAI_KEY", "old")]))
            .unwrap();
        assert_eq!(judge.api_key.as_deref(), Some("old"));
    }

    #[test]
    fn test_local_provider_needs_no_key() {
        let judge = JudgeConfig::new("local", ProviderKind::Ollama)
            .resolve(env_of(&[]))
            .unwrap();
        assert!(judge.api_key.is_none());
    }

    #[test]
    fn test_invalid_temperature() {
        let err = JudgeConfig::new("j", ProviderKind::Ollama)
            .with_temperature(3.5)
            .resolve(env_of(&[]))
            .unwrap_err();
        assert!(matches!(err, JudgeConfigError::InvalidTemperature { .. }));
    }

    #[test]
    fn test_endpoint_never_double_appends() {
        assert_eq!(
            chat_completions_url("https://api.x.ai/v1"),
            "https://api.x.ai/v1/chat/completions"
        );
        assert_eq!(
            chat_completions_url("https://api.x.ai/v1/chat/completions/"),
            "https://api.x.ai/v1/chat/completions"
        );
        assert_eq!(
            chat_completions_url(&chat_completions_url("http://localhost:8080")),
            "http://localhost:8080/chat/completions"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let judge = JudgeConfig::new("j", ProviderKind::OpenAi)
            .with_api_key("sk-secret")
            .resolve(env_of(&[]))
            .unwrap();
        let debug = format!("{:?}", judge);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: JudgeConfig =
            serde_json::from_str(r#"{"name":"grok","provider":"grok","weight":2.0}"#).unwrap();
        assert_eq!(config.provider, ProviderKind::Grok);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.weight, 2.0);
    }
}
