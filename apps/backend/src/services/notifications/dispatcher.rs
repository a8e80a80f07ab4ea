//! Bounded queue plus background worker for notification delivery.
//!
//! Enqueueing never blocks the request path: a full or closed queue drops the
//! job with a warning. The worker retries each job with exponential backoff
//! and gives up after `max_attempts`, logging the loss.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{NotificationJob, NotificationSink, NotifyError};
use crate::config::notify::NotifyConfig;
use crate::logging::pii::Redacted;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1), capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl From<&NotifyConfig> for RetryPolicy {
    fn from(cfg: &NotifyConfig) -> Self {
        Self {
            max_attempts: cfg.max_attempts.max(1),
            base_delay: cfg.retry_base,
            max_delay: cfg.retry_max,
        }
    }
}

/// Cloneable handle used by the game service to enqueue jobs.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<NotificationJob>,
}

impl NotificationDispatcher {
    /// Start the worker on the current runtime.
    ///
    /// The worker stops when `cancel` fires or every handle is dropped.
    pub fn spawn(
        sink: Arc<dyn NotificationSink>,
        capacity: usize,
        policy: RetryPolicy,
        cancel: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(rx, sink, policy, cancel));
        (Self { tx }, handle)
    }

    pub fn from_config(
        sink: Arc<dyn NotificationSink>,
        cfg: &NotifyConfig,
        cancel: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        Self::spawn(sink, cfg.queue_capacity, RetryPolicy::from(cfg), cancel)
    }

    /// Queue a job without waiting. Returns false if it was dropped.
    pub fn enqueue(&self, job: NotificationJob) -> bool {
        let kind = job.kind();
        match self.tx.try_send(job) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(kind, "Notification queue full, dropping job");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!(kind, "Notification worker stopped, dropping job");
                false
            }
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<NotificationJob>,
    sink: Arc<dyn NotificationSink>,
    policy: RetryPolicy,
    cancel: CancellationToken,
) {
    info!(max_attempts = policy.max_attempts, "Notification worker started");
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => deliver_with_retry(sink.as_ref(), &job, policy, &cancel).await,
                None => break,
            },
        }
    }
    let pending = rx.len();
    if pending > 0 {
        warn!(pending, "Notification worker stopping with undelivered jobs");
    }
    info!("Notification worker stopped");
}

async fn deliver(sink: &dyn NotificationSink, job: &NotificationJob) -> Result<(), NotifyError> {
    match job {
        NotificationJob::Message { to, body } => sink.send(to, body).await,
        NotificationJob::Summary(summary) => sink.publish(summary).await,
    }
}

async fn deliver_with_retry(
    sink: &dyn NotificationSink,
    job: &NotificationJob,
    policy: RetryPolicy,
    cancel: &CancellationToken,
) {
    let kind = job.kind();
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(kind, attempt, "Shutdown during notification delivery, dropping job");
                return;
            }
            sent = deliver(sink, job) => sent,
        };
        let err = match sent {
            Ok(()) => {
                debug!(kind, attempt, "Notification delivered");
                return;
            }
            Err(err) => err,
        };

        if !err.is_retryable() {
            error!(kind, attempt, error = %err, "Notification failed, not retryable");
            return;
        }
        if attempt >= policy.max_attempts {
            match job {
                NotificationJob::Message { to, .. } => error!(
                    kind,
                    attempt,
                    recipient = %Redacted(to),
                    error = %err,
                    "Notification retries exhausted"
                ),
                NotificationJob::Summary(summary) => error!(
                    kind,
                    attempt,
                    session_id = summary.session_id,
                    error = %err,
                    "Notification retries exhausted"
                ),
            }
            return;
        }

        let delay = policy.delay_for(attempt);
        warn!(
            kind,
            attempt,
            retry_delay_ms = delay.as_millis() as u64,
            error = %err,
            "Notification failed, retrying"
        );
        tokio::select! {
            _ = cancel.cancelled() => {
                warn!(kind, attempt, "Shutdown during notification retry, dropping job");
                return;
            }
            _ = sleep(delay) => {}
        }
    }
}
