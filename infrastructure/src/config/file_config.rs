//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [council]
//! mode = "ceo-veto"
//! lead_supervisor = "grok"
//! fallback_supervisors = ["gpt"]
//!
//! [veto]
//! timeout_seconds = 300
//! require_reason = true
//! persist_path = "~/.local/state/judge-council/vetoes.json"
//!
//! [retry]
//! max_attempts = 3
//!
//! [[judges]]
//! name = "grok"
//! provider = "grok"
//! weight = 2.0
//! ```

use council_application::VetoPolicy;
use council_domain::{CouncilConfig, JudgeConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("veto.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("veto.sweep_interval_ms cannot be 0")]
    InvalidSweepInterval,

    #[error("veto reminder band is inverted: {min}s > {max}s")]
    InvalidReminderBand { min: u64, max: u64 },

    #[error("council.threshold must be within 0..=1, got {0}")]
    InvalidThreshold(f64),

    #[error("judge name cannot be empty")]
    EmptyJudgeName,

    #[error("duplicate judge name: {0}")]
    DuplicateJudgeName(String),

    #[error("retry.max_attempts cannot be 0")]
    InvalidRetryAttempts,
}

/// Raw veto configuration from TOML (`[veto]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVetoConfig {
    /// Default deadline for new veto requests
    pub timeout_seconds: u64,
    /// Expiration sweep period
    pub sweep_interval_ms: u64,
    /// Reminder band, in seconds of remaining time
    pub reminder_min_seconds: u64,
    pub reminder_max_seconds: u64,
    /// Refuse approve/reject without a reason
    pub require_reason: bool,
    /// Polling period for waits
    pub poll_interval_ms: u64,
    /// Snapshot file for save/load
    pub persist_path: Option<PathBuf>,
    /// JSONL audit trail of veto events
    pub audit_log: Option<PathBuf>,
}

impl Default for FileVetoConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 300,
            sweep_interval_ms: 10_000,
            reminder_min_seconds: 50,
            reminder_max_seconds: 60,
            require_reason: false,
            poll_interval_ms: 100,
            persist_path: None,
            audit_log: None,
        }
    }
}

impl FileVetoConfig {
    pub fn to_policy(&self) -> VetoPolicy {
        VetoPolicy::default()
            .with_default_timeout(Duration::from_secs(self.timeout_seconds))
            .with_sweep_interval(Duration::from_millis(self.sweep_interval_ms))
            .with_reminder_band(
                Duration::from_secs(self.reminder_min_seconds),
                Duration::from_secs(self.reminder_max_seconds),
            )
            .with_require_reason(self.require_reason)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms))
    }
}

/// Raw retry configuration from TOML (`[retry]` section)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetryConfig {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    /// Per-request HTTP timeout
    pub request_timeout_seconds: u64,
}

impl Default for FileRetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            request_timeout_seconds: 60,
        }
    }
}

impl FileRetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_initial_backoff(Duration::from_millis(self.initial_backoff_ms))
            .with_max_backoff(Duration::from_millis(self.max_backoff_ms))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Consensus settings
    pub council: CouncilConfig,
    /// Veto window settings
    pub veto: FileVetoConfig,
    /// Retry settings shared by all judges
    pub retry: FileRetryConfig,
    /// Participating judges
    pub judges: Vec<JudgeConfig>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.veto.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.veto.sweep_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidSweepInterval);
        }
        if self.veto.reminder_min_seconds > self.veto.reminder_max_seconds {
            return Err(ConfigValidationError::InvalidReminderBand {
                min: self.veto.reminder_min_seconds,
                max: self.veto.reminder_max_seconds,
            });
        }
        if let Some(threshold) = self.council.threshold
            && !(0.0..=1.0).contains(&threshold)
        {
            return Err(ConfigValidationError::InvalidThreshold(threshold));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigValidationError::InvalidRetryAttempts);
        }

        let mut seen = HashSet::new();
        for judge in &self.judges {
            let name = judge.name.trim();
            if name.is_empty() {
                return Err(ConfigValidationError::EmptyJudgeName);
            }
            if !seen.insert(name) {
                return Err(ConfigValidationError::DuplicateJudgeName(name.to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ConsensusMode, ProviderKind};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
mode = "ceo-veto"
lead_supervisor = "grok"
fallback_supervisors = ["gpt"]

[veto]
timeout_seconds = 120
require_reason = true
persist_path = "/var/lib/council/vetoes.json"

[retry]
max_attempts = 5

[[judges]]
name = "grok"
provider = "grok"
weight = 2.0

[[judges]]
name = "gpt"
provider = "openai"
model = "gpt-4.1"
temperature = 0.2
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.mode, ConsensusMode::CeoVeto);
        assert_eq!(config.council.lead_supervisor.as_deref(), Some("grok"));
        assert_eq!(config.council.fallback_supervisors, vec!["gpt"]);
        assert_eq!(config.veto.timeout_seconds, 120);
        assert!(config.veto.require_reason);
        assert_eq!(
            config.veto.persist_path,
            Some(PathBuf::from("/var/lib/council/vetoes.json"))
        );
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.judges.len(), 2);
        assert_eq!(config.judges[0].provider, ProviderKind::Grok);
        assert_eq!(config.judges[0].weight, 2.0);
        assert_eq!(config.judges[1].model.as_deref(), Some("gpt-4.1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.council.mode, ConsensusMode::SimpleMajority);
        assert!(config.judges.is_empty());
        assert_eq!(config.veto.to_policy(), VetoPolicy::default());
        assert_eq!(config.retry.to_policy(), RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider_fails_to_parse() {
        let toml_str = r#"
[[judges]]
name = "mystery"
provider = "custom"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }

    #[test]
    fn test_validate_duplicate_judges() {
        let mut config = FileConfig::default();
        config.judges = vec![
            JudgeConfig::new("a", ProviderKind::Ollama),
            JudgeConfig::new("a", ProviderKind::Groq),
        ];
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateJudgeName("a".to_string()))
        );
    }

    #[test]
    fn test_validate_reminder_band() {
        let mut config = FileConfig::default();
        config.veto.reminder_min_seconds = 90;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidReminderBand { min: 90, max: 60 })
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.veto.timeout_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }
}
