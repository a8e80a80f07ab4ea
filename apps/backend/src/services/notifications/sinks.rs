//! Concrete delivery channels.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use super::{GameSummary, NotificationSink, NotifyError};
use crate::config::notify::{NotifyConfig, SmsConfig};
use crate::logging::pii::Redacted;

/// Writes notifications to the log only. Default when no channel is configured.
#[derive(Debug, Default, Clone)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        info!(recipient = %Redacted(recipient), body = message, "Player notification");
        Ok(())
    }

    async fn publish(&self, summary: &GameSummary) -> Result<(), NotifyError> {
        info!(
            session_id = summary.session_id,
            status = %summary.status,
            attempts_used = summary.attempts_used,
            "Game summary"
        );
        Ok(())
    }
}

fn transport(e: reqwest::Error) -> NotifyError {
    NotifyError::Transport(e.without_url().to_string())
}

fn check_status(resp: &reqwest::Response) -> Result<(), NotifyError> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(NotifyError::Rejected {
            status: status.as_u16(),
        })
    }
}

/// SMS through a Twilio-style account API: form POST with basic auth.
#[derive(Debug, Clone)]
pub struct SmsSink {
    client: reqwest::Client,
    cfg: SmsConfig,
}

impl SmsSink {
    pub fn new(client: reqwest::Client, cfg: SmsConfig) -> Self {
        Self { client, cfg }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/Accounts/{}/Messages.json",
            self.cfg.api_url.trim_end_matches('/'),
            self.cfg.account_sid
        )
    }
}

#[async_trait]
impl NotificationSink for SmsSink {
    async fn send(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        let form = [
            ("To", recipient),
            ("From", self.cfg.from.as_str()),
            ("Body", message),
        ];
        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.cfg.account_sid, Some(&self.cfg.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(transport)?;
        check_status(&resp)
    }

    async fn publish(&self, _summary: &GameSummary) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured("summary"))
    }
}

/// Posts summaries as `{"text": ...}` JSON to a chat webhook.
///
/// Without a URL the summary is logged as an error and skipped.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: Option<String>,
}

impl WebhookSink {
    pub fn new(client: reqwest::Client, url: Option<String>) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn send(&self, _recipient: &str, _message: &str) -> Result<(), NotifyError> {
        Err(NotifyError::NotConfigured("sms"))
    }

    async fn publish(&self, summary: &GameSummary) -> Result<(), NotifyError> {
        let Some(url) = self.url.as_deref() else {
            error!(
                session_id = summary.session_id,
                "Summary webhook URL is not configured, summary skipped"
            );
            return Ok(());
        };

        let resp = self
            .client
            .post(url)
            .json(&json!({ "text": summary.render_text() }))
            .send()
            .await
            .map_err(transport)?;
        check_status(&resp)
    }
}

/// Routes texts and summaries to separate channels.
#[derive(Clone)]
pub struct CompositeSink {
    messages: Arc<dyn NotificationSink>,
    summaries: Arc<dyn NotificationSink>,
}

impl CompositeSink {
    pub fn new(messages: Arc<dyn NotificationSink>, summaries: Arc<dyn NotificationSink>) -> Self {
        Self {
            messages,
            summaries,
        }
    }

    /// Wire channels from configuration. Unconfigured SMS falls back to the log.
    pub fn from_config(cfg: &NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()
            .map_err(transport)?;

        let messages: Arc<dyn NotificationSink> = match &cfg.sms {
            Some(sms) => Arc::new(SmsSink::new(client.clone(), sms.clone())),
            None => {
                info!("SMS channel not configured, player texts go to the log");
                Arc::new(LogSink)
            }
        };
        let summaries: Arc<dyn NotificationSink> = Arc::new(WebhookSink::new(
            client,
            cfg.summary_webhook_url.clone(),
        ));

        Ok(Self::new(messages, summaries))
    }
}

#[async_trait]
impl NotificationSink for CompositeSink {
    async fn send(&self, recipient: &str, message: &str) -> Result<(), NotifyError> {
        self.messages.send(recipient, message).await
    }

    async fn publish(&self, summary: &GameSummary) -> Result<(), NotifyError> {
        self.summaries.publish(summary).await
    }
}
