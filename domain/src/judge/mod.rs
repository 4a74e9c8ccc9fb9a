//! Judge domain
//!
//! A judge is one configured AI-model participant. Configuration is
//! resolved once into a [`ResolvedJudge`] and reused across debate rounds.

pub mod config;
pub mod message;
pub mod provider;
pub mod retry;

pub use config::{JudgeConfig, ResolvedJudge, chat_completions_url};
pub use message::{ChatMessage, Role};
pub use provider::{ProviderKind, ProviderProfile};
pub use retry::RetryPolicy;
