//! Judge roster built from `[[judges]]` configuration

use super::openai_compatible::OpenAiCompatibleJudge;
use crate::config::{ConfigError, FileConfig};
use council_application::Judge;
use council_domain::{JudgeConfig, RetryPolicy};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The judges participating in a council, in configuration order
pub struct JudgeRoster {
    judges: Vec<Arc<OpenAiCompatibleJudge>>,
}

impl JudgeRoster {
    /// Build every configured judge, resolving credentials from the process environment
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigError> {
        Self::build(
            &config.judges,
            config.retry.to_policy(),
            config.retry.request_timeout(),
            |name| std::env::var(name).ok(),
        )
    }

    /// Build judges with an explicit environment lookup
    ///
    /// The first judge whose credentials cannot be resolved aborts the build.
    pub fn build<F>(
        configs: &[JudgeConfig],
        retry: RetryPolicy,
        request_timeout: Duration,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        let mut judges = Vec::with_capacity(configs.len());
        for config in configs {
            let resolved = config.resolve(&env)?;
            info!(
                judge = %resolved.name,
                provider = %resolved.provider,
                model = %resolved.model,
                "Configured judge"
            );
            judges.push(Arc::new(
                OpenAiCompatibleJudge::new(resolved)
                    .with_client(client.clone())
                    .with_retry_policy(retry),
            ));
        }

        Ok(Self { judges })
    }

    /// Judges as trait objects, ready for vote collection
    pub fn judges(&self) -> Vec<Arc<dyn Judge>> {
        self.judges
            .iter()
            .map(|judge| Arc::clone(judge) as Arc<dyn Judge>)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<Arc<OpenAiCompatibleJudge>> {
        self.judges.iter().find(|j| j.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.judges.iter().map(|j| j.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.judges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.judges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{JudgeConfigError, ProviderKind};

    fn env(name: &str) -> Option<String> {
        match name {
            "XAI_API_KEY" => Some("xai-key".to_string()),
            "GROQ_API_KEY" => Some("gsk".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_builds_in_order() {
        let configs = vec![
            JudgeConfig::new("grok", ProviderKind::Grok).with_weight(2.0),
            JudgeConfig::new("groq", ProviderKind::Groq),
            JudgeConfig::new("local", ProviderKind::Ollama),
        ];
        let roster =
            JudgeRoster::build(&configs, RetryPolicy::none(), Duration::from_secs(5), env)
                .unwrap();

        assert_eq!(roster.names(), vec!["grok", "groq", "local"]);
        assert_eq!(roster.judges().len(), 3);
        let grok = roster.get("grok").unwrap();
        assert_eq!(grok.weight(), 2.0);
        assert_eq!(grok.resolved().api_key.as_deref(), Some("xai-key"));
    }

    #[test]
    fn test_missing_credentials_abort_build() {
        let configs = vec![
            JudgeConfig::new("local", ProviderKind::Ollama),
            JudgeConfig::new("mistral", ProviderKind::Mistral),
        ];
        let err = JudgeRoster::build(&configs, RetryPolicy::none(), Duration::from_secs(5), env)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConfigError::Judge(JudgeConfigError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_empty_roster() {
        let roster = JudgeRoster::from_config(&FileConfig::default()).unwrap();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
    }
}
