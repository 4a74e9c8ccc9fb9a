//! JSONL audit trail for veto events.
//!
//! Each [`VetoEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use council_application::VetoNotifier;
use council_domain::VetoEvent;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Veto notifier that appends one JSON object per event.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlVetoAuditLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlVetoAuditLog {
    /// Open the audit log for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create veto audit directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open veto audit log {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VetoNotifier for JsonlVetoAuditLog {
    fn notify(&self, event: &VetoEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let record = match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "timestamp".to_string(),
                    serde_json::Value::String(timestamp),
                );
                serde_json::Value::Object(map)
            }
            Ok(other) => serde_json::json!({
                "type": event.event_type(),
                "timestamp": timestamp,
                "data": other,
            }),
            Err(e) => {
                warn!("Could not serialize veto event: {}", e);
                return;
            }
        };

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlVetoAuditLog {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::{ConsensusEngine, CouncilConfig, VetoRequest, Vote};
    use std::time::Duration;

    fn request() -> VetoRequest {
        let decision =
            ConsensusEngine::decide(vec![Vote::approve("a", "ok")], &CouncilConfig::default())
                .unwrap();
        VetoRequest::new("req-1", decision, "deploy", Utc::now(), Duration::from_secs(60))
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit/veto.jsonl");
        let log = JsonlVetoAuditLog::new(&path).unwrap();

        log.notify(&VetoEvent::Created { request: request() });
        log.notify(&VetoEvent::Reminder {
            request: request(),
            remaining_ms: 55_000,
        });
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "created");
        assert_eq!(lines[0]["request"]["id"], "req-1");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["type"], "reminder");
        assert_eq!(lines[1]["remaining_ms"], 55_000);
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("veto.jsonl");

        let log = JsonlVetoAuditLog::new(&path).unwrap();
        log.notify(&VetoEvent::Created { request: request() });
        drop(log);

        let log = JsonlVetoAuditLog::new(&path).unwrap();
        log.notify(&VetoEvent::Expired { request: request() });
        drop(log);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["type"], "expired");
    }
}
