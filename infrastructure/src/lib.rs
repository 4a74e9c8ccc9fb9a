//! Infrastructure layer for judge-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod providers;

// Re-export commonly used types
pub use bootstrap::veto_manager_from_config;
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileConfig, FileRetryConfig, FileVetoConfig,
};
pub use logging::{JsonlVetoAuditLog, TracingVetoNotifier, init_tracing};
pub use persistence::JsonFileVetoStore;
pub use providers::{JudgeRoster, OpenAiCompatibleJudge, with_retry};
