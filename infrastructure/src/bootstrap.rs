//! Wiring of configured adapters into application services

use crate::config::FileVetoConfig;
use crate::logging::{JsonlVetoAuditLog, TracingVetoNotifier};
use crate::persistence::JsonFileVetoStore;
use council_application::VetoManager;
use std::sync::Arc;
use tracing::info;

/// Build a veto manager from the `[veto]` section
///
/// Always logs events through `tracing`. Attaches the JSONL audit log and
/// the JSON snapshot store when their paths are configured. The sweep is
/// not started.
pub fn veto_manager_from_config(config: &FileVetoConfig) -> VetoManager {
    let mut builder =
        VetoManager::builder(config.to_policy()).notifier(Arc::new(TracingVetoNotifier));

    if let Some(path) = &config.audit_log
        && let Some(audit) = JsonlVetoAuditLog::new(path)
    {
        info!("Veto audit log: {}", audit.path().display());
        builder = builder.notifier(Arc::new(audit));
    }

    if let Some(path) = &config.persist_path {
        info!("Veto snapshots: {}", path.display());
        builder = builder.store(Arc::new(JsonFileVetoStore::new(path)));
    }

    builder.build()
}
