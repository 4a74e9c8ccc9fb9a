//! Judge adapters
//!
//! - [`OpenAiCompatibleJudge`]: chat-completions client shared by every provider
//! - [`with_retry`]: bounded exponential backoff for transient failures
//! - [`JudgeRoster`]: judges built from `[[judges]]` configuration

mod openai_compatible;
mod retry;
mod roster;

pub use openai_compatible::OpenAiCompatibleJudge;
pub use retry::with_retry;
pub use roster::JudgeRoster;
