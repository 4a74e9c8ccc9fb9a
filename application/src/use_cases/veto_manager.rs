//! Veto governance manager
//!
//! Owns the table of [`VetoRequest`]s and drives their lifecycle:
//!
//! - request-driven transitions: `create`, `approve`, `reject`, `extend`, `delete`
//! - a timer-driven expiration sweep that also fires one-shot reminders
//! - waits that poll until a request reaches a terminal state
//! - explicit snapshot persistence through the [`VetoStore`] port
//!
//! Both writer paths (human resolution and the sweep) perform their
//! check-and-set while holding the table lock, and the lock is never held
//! across an `.await`. Exactly one of two racing terminal transitions wins;
//! the other observes [`VetoError::InvalidState`].

use crate::config::VetoPolicy;
use crate::ports::veto_notifier::VetoNotifier;
use crate::ports::veto_store::VetoStore;
use chrono::{DateTime, Utc};
use council_domain::{CouncilDecision, Resolution, VetoError, VetoEvent, VetoRequest, VetoStats};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Floor for the sweep period; `tokio::time::interval` rejects zero.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// State shared between the manager handle and its sweep task
struct Shared {
    requests: Mutex<HashMap<String, VetoRequest>>,
    /// Signalled on every terminal transition, deletion and reload
    changed: Notify,
    policy: VetoPolicy,
    notifiers: Vec<Arc<dyn VetoNotifier>>,
    store: Option<Arc<dyn VetoStore>>,
}

impl Shared {
    fn table(&self) -> MutexGuard<'_, HashMap<String, VetoRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, events: &[VetoEvent]) {
        for event in events {
            for notifier in &self.notifiers {
                notifier.notify(event);
            }
        }
    }

    /// Expire overdue requests and fire due reminders
    fn sweep(&self, now: DateTime<Utc>) -> SweepReport {
        let mut events = Vec::new();
        let mut report = SweepReport::default();
        {
            let mut table = self.table();
            for request in table.values_mut() {
                if request.expire_if_due(now) {
                    report.expired += 1;
                    events.push(VetoEvent::Expired {
                        request: request.clone(),
                    });
                } else if request.reminder_due(
                    now,
                    self.policy.reminder_min_remaining,
                    self.policy.reminder_max_remaining,
                ) {
                    request.reminder_sent = true;
                    report.reminders += 1;
                    events.push(VetoEvent::Reminder {
                        remaining_ms: duration_ms(request.remaining(now)),
                        request: request.clone(),
                    });
                }
            }
        }

        for event in &events {
            match event {
                VetoEvent::Expired { request } => {
                    info!(request_id = %request.id, "Veto request expired without resolution");
                }
                VetoEvent::Reminder { request, remaining_ms } => {
                    debug!(request_id = %request.id, remaining_ms, "Veto reminder due");
                }
                _ => {}
            }
        }

        if report.expired > 0 {
            self.changed.notify_waiters();
        }
        self.emit(&events);
        report
    }
}

/// Outcome of one sweep pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub expired: usize,
    pub reminders: usize,
}

struct SweepTask {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Builder for [`VetoManager`]
pub struct VetoManagerBuilder {
    policy: VetoPolicy,
    notifiers: Vec<Arc<dyn VetoNotifier>>,
    store: Option<Arc<dyn VetoStore>>,
}

impl VetoManagerBuilder {
    /// Register an observer for lifecycle events
    pub fn notifier(mut self, notifier: Arc<dyn VetoNotifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    /// Attach snapshot storage for `save`/`load`
    pub fn store(mut self, store: Arc<dyn VetoStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> VetoManager {
        VetoManager {
            shared: Arc::new(Shared {
                requests: Mutex::new(HashMap::new()),
                changed: Notify::new(),
                policy: self.policy,
                notifiers: self.notifiers,
                store: self.store,
            }),
            sweep: Mutex::new(None),
        }
    }
}

/// Time-bounded human override for council decisions
///
/// Constructed explicitly and owned by the host; there is no global
/// instance. The background sweep is started with [`VetoManager::start`]
/// and is cancelled on [`VetoManager::stop`] or when the manager is dropped.
pub struct VetoManager {
    shared: Arc<Shared>,
    sweep: Mutex<Option<SweepTask>>,
}

impl VetoManager {
    pub fn new(policy: VetoPolicy) -> Self {
        Self::builder(policy).build()
    }

    pub fn builder(policy: VetoPolicy) -> VetoManagerBuilder {
        VetoManagerBuilder {
            policy,
            notifiers: Vec::new(),
            store: None,
        }
    }

    pub fn policy(&self) -> &VetoPolicy {
        &self.shared.policy
    }

    // ==================== Transitions ====================

    /// Open a pending request for `decision`
    ///
    /// `timeout` defaults to the policy's `default_timeout`.
    pub fn create(
        &self,
        decision: CouncilDecision,
        task_description: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<VetoRequest, VetoError> {
        let timeout = timeout.unwrap_or(self.shared.policy.default_timeout);
        if timeout.is_zero() {
            return Err(VetoError::Validation(
                "timeout must be greater than zero".to_string(),
            ));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let mut request = VetoRequest::new(id, decision, task_description, Utc::now(), timeout);
        // Starting inside the band never crosses into it
        request.reminder_sent = timeout <= self.shared.policy.reminder_max_remaining;
        self.shared
            .table()
            .insert(request.id.clone(), request.clone());

        info!(
            request_id = %request.id,
            approved = request.decision.approved,
            expires_at = %request.expires_at,
            "Veto request created"
        );
        self.shared.emit(&[VetoEvent::Created {
            request: request.clone(),
        }]);
        Ok(request)
    }

    /// Let the council decision stand
    pub fn approve(
        &self,
        id: &str,
        by: &str,
        reason: Option<&str>,
    ) -> Result<VetoRequest, VetoError> {
        self.resolve(id, Resolution::Approve, by, reason)
    }

    /// Override the council decision
    pub fn reject(
        &self,
        id: &str,
        by: &str,
        reason: Option<&str>,
    ) -> Result<VetoRequest, VetoError> {
        self.resolve(id, Resolution::Reject, by, reason)
    }

    fn resolve(
        &self,
        id: &str,
        resolution: Resolution,
        by: &str,
        reason: Option<&str>,
    ) -> Result<VetoRequest, VetoError> {
        if by.trim().is_empty() {
            return Err(VetoError::Validation(
                "resolver identity must not be empty".to_string(),
            ));
        }
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        if self.shared.policy.require_reason && reason.is_none() {
            return Err(VetoError::Validation(
                "a reason is required to resolve a veto request".to_string(),
            ));
        }

        let resolved = {
            let mut table = self.shared.table();
            let request = table
                .get_mut(id)
                .ok_or_else(|| VetoError::NotFound(id.to_string()))?;
            request.resolve(resolution, by, reason, Utc::now())?;
            request.clone()
        };

        info!(
            request_id = %resolved.id,
            status = %resolved.status,
            resolved_by = by,
            "Veto request resolved"
        );
        self.shared.changed.notify_waiters();
        self.shared.emit(&[VetoEvent::Resolved {
            request: resolved.clone(),
        }]);
        Ok(resolved)
    }

    /// Push a pending request's deadline back by `additional`
    pub fn extend(&self, id: &str, additional: Duration) -> Result<VetoRequest, VetoError> {
        let extended = {
            let mut table = self.shared.table();
            let request = table
                .get_mut(id)
                .ok_or_else(|| VetoError::NotFound(id.to_string()))?;
            request.extend(additional)?;
            request.clone()
        };

        info!(
            request_id = %extended.id,
            expires_at = %extended.expires_at,
            "Veto request extended"
        );
        self.shared.emit(&[VetoEvent::Extended {
            additional_ms: duration_ms(additional),
            request: extended.clone(),
        }]);
        Ok(extended)
    }

    /// Remove a request regardless of status
    ///
    /// Outstanding waits on the id fail with [`VetoError::NotFound`].
    pub fn delete(&self, id: &str) -> Result<VetoRequest, VetoError> {
        let removed = self
            .shared
            .table()
            .remove(id)
            .ok_or_else(|| VetoError::NotFound(id.to_string()))?;

        info!(request_id = %removed.id, status = %removed.status, "Veto request deleted");
        self.shared.changed.notify_waiters();
        self.shared.emit(&[VetoEvent::Deleted {
            request: removed.clone(),
        }]);
        Ok(removed)
    }

    /// Drop every terminal request, returning how many were removed
    pub fn clear_resolved(&self) -> usize {
        let mut table = self.shared.table();
        let before = table.len();
        table.retain(|_, request| request.is_pending());
        let removed = before - table.len();
        if removed > 0 {
            debug!(removed, "Cleared resolved veto requests");
        }
        removed
    }

    // ==================== Queries ====================

    pub fn get(&self, id: &str) -> Option<VetoRequest> {
        self.shared.table().get(id).cloned()
    }

    /// All requests, oldest first
    pub fn list(&self) -> Vec<VetoRequest> {
        self.snapshot(|_| true)
    }

    /// Pending requests, oldest first
    pub fn list_pending(&self) -> Vec<VetoRequest> {
        self.snapshot(VetoRequest::is_pending)
    }

    fn snapshot(&self, keep: impl Fn(&VetoRequest) -> bool) -> Vec<VetoRequest> {
        let mut requests: Vec<_> = self
            .shared
            .table()
            .values()
            .filter(|r| keep(*r))
            .cloned()
            .collect();
        requests.sort_by(|a, b| {
            a.requested_at
                .cmp(&b.requested_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        requests
    }

    /// Time left before expiry; zero for non-pending requests
    pub fn get_remaining_time(&self, id: &str) -> Result<Duration, VetoError> {
        self.shared
            .table()
            .get(id)
            .map(|r| r.remaining(Utc::now()))
            .ok_or_else(|| VetoError::NotFound(id.to_string()))
    }

    pub fn stats(&self) -> VetoStats {
        VetoStats::from_requests(self.shared.table().values())
    }

    // ==================== Sweep ====================

    /// Run one sweep pass as of `now`
    pub fn run_sweep_once(&self, now: DateTime<Utc>) -> SweepReport {
        self.shared.sweep(now)
    }

    /// Spawn the background sweep on the current Tokio runtime
    ///
    /// Returns `false` if the sweep is already running.
    pub fn start(&self) -> bool {
        let mut slot = self.sweep.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|task| !task.handle.is_finished()) {
            return false;
        }

        let token = CancellationToken::new();
        let period = self.shared.policy.sweep_interval.max(MIN_SWEEP_INTERVAL);
        let shared = Arc::clone(&self.shared);
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        shared.sweep(Utc::now());
                    }
                }
            }
            debug!("Veto sweep stopped");
        });

        info!(interval_ms = duration_ms(period), "Veto sweep started");
        *slot = Some(SweepTask { token, handle });
        true
    }

    /// Cancel the background sweep and wait for it to finish
    pub async fn stop(&self) {
        let task = self
            .sweep
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.token.cancel();
            if let Err(e) = task.handle.await {
                warn!("Veto sweep task ended abnormally: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.sweep
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.handle.is_finished())
    }

    // ==================== Waiting ====================

    /// Wait until the request is terminal
    ///
    /// Polls at the policy's `poll_interval` and also wakes on every
    /// resolution, expiration and deletion. Fails with
    /// [`VetoError::NotFound`] once the request disappears and with
    /// [`VetoError::WaitTimedOut`] when `timeout` elapses first.
    pub async fn wait_for_resolution(
        &self,
        id: &str,
        timeout: Option<Duration>,
    ) -> Result<VetoRequest, VetoError> {
        let deadline = timeout.map(|t| Instant::now() + t);
        let poll = self.shared.policy.poll_interval.max(MIN_SWEEP_INTERVAL);

        loop {
            let notified = self.shared.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            match self.get(id) {
                None => return Err(VetoError::NotFound(id.to_string())),
                Some(request) if request.status.is_terminal() => return Ok(request),
                Some(_) => {}
            }

            let nap = match deadline {
                Some(deadline) => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    if left.is_zero() {
                        return Err(VetoError::WaitTimedOut(id.to_string()));
                    }
                    poll.min(left)
                }
                None => poll,
            };

            tokio::select! {
                _ = &mut notified => {}
                _ = tokio::time::sleep(nap) => {}
            }
        }
    }

    // ==================== Persistence ====================

    /// Write every request to the attached store
    pub fn save(&self) -> Result<usize, VetoError> {
        let store = self.store()?;
        let requests = self.list();
        store.save(&requests)?;
        info!(count = requests.len(), "Saved veto requests");
        Ok(requests.len())
    }

    /// Replace in-memory state with the stored snapshot
    ///
    /// Returns `Ok(Some(count))` after a successful reload. Unreadable
    /// stored data is logged and yields `Ok(None)` with the in-memory state
    /// left untouched.
    pub fn load(&self) -> Result<Option<usize>, VetoError> {
        let store = self.store()?;
        let loaded = match store.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("Ignoring unreadable veto snapshot: {}", e);
                return Ok(None);
            }
        };

        let count = loaded.len();
        {
            let mut table = self.shared.table();
            *table = loaded
                .into_iter()
                .map(|request| (request.id.clone(), request))
                .collect();
        }
        self.shared.changed.notify_waiters();
        info!(count, "Loaded veto requests");
        Ok(Some(count))
    }

    fn store(&self) -> Result<&Arc<dyn VetoStore>, VetoError> {
        self.shared
            .store
            .as_ref()
            .ok_or_else(|| VetoError::Persistence("no veto store configured".to_string()))
    }
}

impl Drop for VetoManager {
    fn drop(&mut self) {
        let slot = self.sweep.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.token.cancel();
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
