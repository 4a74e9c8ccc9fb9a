//! Logging infrastructure: veto audit trail and subscriber setup.
//!
//! - [`JsonlVetoAuditLog`]: JSONL file writer implementing
//!   [`VetoNotifier`](council_application::VetoNotifier)
//! - [`TracingVetoNotifier`]: forwards veto events to `tracing`
//! - [`init_tracing`]: install a `fmt` subscriber for hosts without one

mod jsonl_audit_log;
mod tracing_notifier;

pub use jsonl_audit_log::JsonlVetoAuditLog;
pub use tracing_notifier::TracingVetoNotifier;

use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber filtered by verbosity
///
/// `RUST_LOG` takes precedence when set. Returns `false` if a subscriber
/// was already installed.
pub fn init_tracing(verbose: u8) -> bool {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}
