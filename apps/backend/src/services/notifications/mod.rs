//! Outbound notifications: per-turn texts to the player and post-game
//! summaries for the operators' channel.
//!
//! Delivery is best effort. The game service only enqueues jobs; a background
//! worker delivers them with bounded retry (see [`dispatcher`]).

pub mod dispatcher;
pub mod messages;
pub mod sinks;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::session::{GameSession, GameStatus};

pub use dispatcher::{NotificationDispatcher, RetryPolicy};
pub use sinks::{CompositeSink, LogSink, SmsSink, WebhookSink};

/// Post-game report published once a session reaches a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub session_id: i64,
    pub game_name: String,
    pub player_name: String,
    pub word_length: usize,
    pub attempts_used: u8,
    pub guesses: Vec<String>,
    pub status: GameStatus,
}

impl GameSummary {
    pub fn new(session: &GameSession, player_name: &str) -> Self {
        let guesses = if session.guessed_words.is_empty() {
            session
                .guessed_letters
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            session
                .guessed_words
                .iter()
                .map(|r| r.guess.clone())
                .collect()
        };

        Self {
            session_id: session.id,
            game_name: session
                .name
                .clone()
                .unwrap_or_else(|| format!("Game #{}", session.id)),
            player_name: player_name.to_string(),
            word_length: session.word_length(),
            attempts_used: session.attempts_used(),
            guesses,
            status: session.status,
        }
    }

    /// Chat-style text body, one `*Key:* value` line per field.
    pub fn render_text(&self) -> String {
        let guesses = if self.guesses.is_empty() {
            "-".to_string()
        } else {
            self.guesses.join(", ")
        };
        format!(
            "*Game summary*\n*Game:* {}\n*Player:* {}\n*Word length:* {}\n*Attempts used:* {}\n*Guesses:* {}\n*Status:* {}",
            self.game_name, self.player_name, self.word_length, self.attempts_used, guesses, self.status
        )
    }
}

/// Unit of work for the delivery worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationJob {
    Message { to: String, body: String },
    Summary(GameSummary),
}

impl NotificationJob {
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationJob::Message { .. } => "message",
            NotificationJob::Summary(_) => "summary",
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("channel rejected delivery with status {status}")]
    Rejected { status: u16 },
    #[error("{0} channel is not configured")]
    NotConfigured(&'static str),
}

impl NotifyError {
    /// Transport errors and 5xx / 429 responses are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotifyError::Transport(_) => true,
            NotifyError::Rejected { status } => *status >= 500 || *status == 429,
            NotifyError::NotConfigured(_) => false,
        }
    }
}

/// Delivery channel for player messages and game summaries.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a short text to one recipient (phone number).
    async fn send(&self, recipient: &str, message: &str) -> Result<(), NotifyError>;

    /// Publish a post-game summary.
    async fn publish(&self, summary: &GameSummary) -> Result<(), NotifyError>;
}
