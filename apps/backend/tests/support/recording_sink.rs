use std::time::Duration;

use async_trait::async_trait;
use backend::services::notifications::{GameSummary, NotificationSink, NotifyError};
use parking_lot::Mutex;

/// Captures deliveries instead of sending them.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(String, String)>>,
    summaries: Mutex<Vec<GameSummary>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().clone()
    }

    pub fn summaries(&self) -> Vec<GameSummary> {
        self.summaries.lock().clone()
    }

    /// Poll until `messages` and `summaries` reach the given counts or ~1s passes.
    pub async fn wait_for(&self, messages: usize, summaries: usize) {
        for _ in 0..200 {
            if self.messages.lock().len() >= messages && self.summaries.lock().len() >= summaries
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn send(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .push((recipient.to_string(), message.to_string()));
        Ok(())
    }

    async fn publish(&self, summary: &GameSummary) -> Result<(), NotifyError> {
        self.summaries.lock().push(summary.clone());
        Ok(())
    }
}

/// Always fails with a transport error.
pub struct BrokenSink;

#[async_trait]
impl NotificationSink for BrokenSink {
    async fn send(&self, _recipient: &str, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("connection refused".into()))
    }

    async fn publish(&self, _summary: &GameSummary) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("connection refused".into()))
    }
}
