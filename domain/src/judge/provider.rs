//! Provider profiles for OpenAI-compatible judges
//!
//! Every supported backend speaks the chat-completions wire protocol, so a
//! single judge implementation is parameterized by the profile below.

use crate::core::error::JudgeConfigError;
use serde::{Deserialize, Serialize};

/// Supported provider families
///
/// An unrecognized provider name fails to parse; there is no catch-all
/// profile. Deserialization goes through [`FromStr`](std::str::FromStr), so
/// configuration files accept the same aliases as the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Google,
    Xai,
    Grok,
    Groq,
    Together,
    OpenRouter,
    Mistral,
    DeepSeek,
    Fireworks,
    Perplexity,
    Ollama,
}

/// Static defaults for one provider family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
    pub base_url: &'static str,
    pub default_model: &'static str,
    /// Primary environment variable holding the API key
    pub credential_env: &'static str,
    /// Older variable names still honored, checked in order after the primary
    pub legacy_credential_envs: &'static [&'static str],
    /// Local servers accept unauthenticated requests
    pub requires_credentials: bool,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 13] = [
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Google,
        ProviderKind::Xai,
        ProviderKind::Grok,
        ProviderKind::Groq,
        ProviderKind::Together,
        ProviderKind::OpenRouter,
        ProviderKind::Mistral,
        ProviderKind::DeepSeek,
        ProviderKind::Fireworks,
        ProviderKind::Perplexity,
        ProviderKind::Ollama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::Xai => "xai",
            ProviderKind::Grok => "grok",
            ProviderKind::Groq => "groq",
            ProviderKind::Together => "together",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Mistral => "mistral",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Fireworks => "fireworks",
            ProviderKind::Perplexity => "perplexity",
            ProviderKind::Ollama => "ollama",
        }
    }

    pub fn profile(&self) -> ProviderProfile {
        match self {
            ProviderKind::OpenAi => ProviderProfile {
                base_url: "https://api.openai.com/v1",
                default_model: "gpt-4o",
                credential_env: "OPENAI_API_KEY",
                legacy_credential_envs: &["OPENAI_KEY"],
                requires_credentials: true,
            },
            ProviderKind::Anthropic => ProviderProfile {
                base_url: "https://api.anthropic.com/v1",
                default_model: "claude-sonnet-4-5",
                credential_env: "ANTHROPIC_API_KEY",
                legacy_credential_envs: &["CLAUDE_API_KEY"],
                requires_credentials: true,
            },
            ProviderKind::Google => ProviderProfile {
                base_url: "https://generativelanguage.googleapis.com/v1beta/openai",
                default_model: "gemini-2.5-pro",
                credential_env: "GOOGLE_API_KEY",
                legacy_credential_envs: &["GEMINI_API_KEY"],
                requires_credentials: true,
            },
            ProviderKind::Xai => ProviderProfile {
                base_url: "https://api.x.ai/v1",
                default_model: "grok-4",
                credential_env: "XAI_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            // Grok is served by xAI and inherits its credential variable
            ProviderKind::Grok => ProviderProfile {
                base_url: "https://api.x.ai/v1",
                default_model: "grok-4",
                credential_env: "GROK_API_KEY",
                legacy_credential_envs: &["XAI_API_KEY"],
                requires_credentials: true,
            },
            ProviderKind::Groq => ProviderProfile {
                base_url: "https://api.groq.com/openai/v1",
                default_model: "llama-3.3-70b-versatile",
                credential_env: "GROQ_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::Together => ProviderProfile {
                base_url: "https://api.together.xyz/v1",
                default_model: "meta-llama/Llama-3.3-70B-Instruct-Turbo",
                credential_env: "TOGETHER_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::OpenRouter => ProviderProfile {
                base_url: "https://openrouter.ai/api/v1",
                default_model: "openrouter/auto",
                credential_env: "OPENROUTER_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::Mistral => ProviderProfile {
                base_url: "https://api.mistral.ai/v1",
                default_model: "mistral-large-latest",
                credential_env: "MISTRAL_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::DeepSeek => ProviderProfile {
                base_url: "https://api.deepseek.com/v1",
                default_model: "deepseek-chat",
                credential_env: "DEEPSEEK_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::Fireworks => ProviderProfile {
                base_url: "https://api.fireworks.ai/inference/v1",
                default_model: "accounts/fireworks/models/llama-v3p3-70b-instruct",
                credential_env: "FIREWORKS_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::Perplexity => ProviderProfile {
                base_url: "https://api.perplexity.ai",
                default_model: "sonar-pro",
                credential_env: "PERPLEXITY_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: true,
            },
            ProviderKind::Ollama => ProviderProfile {
                base_url: "http://localhost:11434/v1",
                default_model: "llama3.3",
                credential_env: "OLLAMA_API_KEY",
                legacy_credential_envs: &[],
                requires_credentials: false,
            },
        }
    }

    /// Environment variables consulted for this provider, in lookup order
    pub fn credential_envs(&self) -> Vec<&'static str> {
        let profile = self.profile();
        std::iter::once(profile.credential_env)
            .chain(profile.legacy_credential_envs.iter().copied())
            .collect()
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = JudgeConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "");
        let kind = match normalized.as_str() {
            "openai" => ProviderKind::OpenAi,
            "anthropic" | "claude" => ProviderKind::Anthropic,
            "google" | "gemini" => ProviderKind::Google,
            "xai" => ProviderKind::Xai,
            "grok" => ProviderKind::Grok,
            "groq" => ProviderKind::Groq,
            "together" => ProviderKind::Together,
            "openrouter" => ProviderKind::OpenRouter,
            "mistral" => ProviderKind::Mistral,
            "deepseek" => ProviderKind::DeepSeek,
            "fireworks" => ProviderKind::Fireworks,
            "perplexity" => ProviderKind::Perplexity,
            "ollama" => ProviderKind::Ollama,
            _ => return Err(JudgeConfigError::UnknownProvider(s.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ProviderKind {
    type Error = JudgeConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_provider_fails_loudly() {
        assert_eq!(
            "custom".parse::<ProviderKind>(),
            Err(JudgeConfigError::UnknownProvider("custom".to_string()))
        );
        assert!(serde_json::from_str::<ProviderKind>("\"custom\"").is_err());
    }

    #[test]
    fn test_grok_inherits_xai_credential() {
        assert_eq!(
            ProviderKind::Grok.credential_envs(),
            vec!["GROK_API_KEY", "XAI_API_KEY"]
        );
    }

    #[test]
    fn test_only_local_provider_skips_credentials() {
        let local: Vec<_> = ProviderKind::ALL
            .into_iter()
            .filter(|k| !k.profile().requires_credentials)
            .collect();
        assert_eq!(local, vec![ProviderKind::Ollama]);
    }

    #[test]
    fn test_deserialize_accepts_parser_aliases() {
        for name in ["claude", "open_ai", "Deep-Seek", "x_ai", "OPENROUTER"] {
            let parsed: ProviderKind = name.parse().unwrap();
            let deserialized: ProviderKind =
                serde_json::from_value(serde_json::Value::String(name.to_string())).unwrap();
            assert_eq!(deserialized, parsed, "{}", name);
        }
    }

    #[test]
    fn test_serde_names() {
        let kind: ProviderKind = serde_json::from_str("\"openrouter\"").unwrap();
        assert_eq!(kind, ProviderKind::OpenRouter);
        let kind: ProviderKind = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(kind, ProviderKind::Google);
        let kind: ProviderKind = serde_json::from_str("\"open-ai\"").unwrap();
        assert_eq!(kind, ProviderKind::OpenAi);
        assert_eq!(
            serde_json::to_string(&ProviderKind::DeepSeek).unwrap(),
            "\"deepseek\""
        );
    }
}
