use std::time::Duration;

use crate::config::{optional, parse_or};
use crate::error::AppError;

/// Credentials for the SMS gateway (Twilio-style account API).
#[derive(Clone, PartialEq, Eq)]
pub struct SmsConfig {
    pub api_url: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
}

// Keep the auth token out of Debug output.
impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("api_url", &self.api_url)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// Background delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyConfig {
    pub queue_capacity: usize,
    /// Total delivery attempts per job, including the first.
    pub max_attempts: u32,
    pub retry_base: Duration,
    pub retry_max: Duration,
    pub request_timeout: Duration,
    pub sms: Option<SmsConfig>,
    pub summary_webhook_url: Option<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            max_attempts: 3,
            retry_base: Duration::from_millis(200),
            retry_max: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            sms: None,
            summary_webhook_url: None,
        }
    }
}

impl NotifyConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(crate::config::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let queue_capacity = parse_or(&lookup, "NOTIFY_QUEUE_CAPACITY", defaults.queue_capacity)?;
        if queue_capacity == 0 {
            return Err(AppError::config("NOTIFY_QUEUE_CAPACITY must be at least 1"));
        }
        let max_attempts = parse_or(&lookup, "NOTIFY_MAX_ATTEMPTS", defaults.max_attempts)?.max(1);
        let retry_base_ms = parse_or(&lookup, "NOTIFY_RETRY_BASE_MS", 200u64)?;

        let sms = match (
            optional(&lookup, "SMS_API_URL"),
            optional(&lookup, "SMS_ACCOUNT_SID"),
            optional(&lookup, "SMS_AUTH_TOKEN"),
            optional(&lookup, "SMS_FROM"),
        ) {
            (Some(api_url), Some(account_sid), Some(auth_token), Some(from)) => Some(SmsConfig {
                api_url,
                account_sid,
                auth_token,
                from,
            }),
            (None, None, None, None) => None,
            _ => {
                return Err(AppError::config(
                    "SMS_API_URL, SMS_ACCOUNT_SID, SMS_AUTH_TOKEN and SMS_FROM must be set together",
                ))
            }
        };

        Ok(Self {
            queue_capacity,
            max_attempts,
            retry_base: Duration::from_millis(retry_base_ms),
            sms,
            summary_webhook_url: optional(&lookup, "SUMMARY_WEBHOOK_URL"),
            ..defaults
        })
    }
}
