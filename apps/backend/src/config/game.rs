use std::time::Duration;

use crate::config::{optional, parse_or};
use crate::domain::words::{WordList, DEFAULT_WORDS};
use crate::error::AppError;

pub const DEFAULT_MAX_ATTEMPTS: u8 = 5;
pub const DEFAULT_WORD_MODE_LENGTH: usize = 5;
pub const DEFAULT_REPO_TIMEOUT_MS: u64 = 5_000;

/// Game rules and service limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Attempts every new session starts with.
    pub max_attempts: u8,
    pub words: WordList,
    /// Secret length used for word-guess sessions.
    pub word_mode_length: usize,
    /// When false, an owner with a `playing` session cannot start another.
    pub allow_concurrent_sessions: bool,
    /// Upper bound on each repository / directory call.
    pub repo_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            words: WordList::default(),
            word_mode_length: DEFAULT_WORD_MODE_LENGTH,
            allow_concurrent_sessions: false,
            repo_timeout: Duration::from_millis(DEFAULT_REPO_TIMEOUT_MS),
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(crate::config::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_attempts = parse_or(&lookup, "MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if max_attempts == 0 {
            return Err(AppError::config("MAX_ATTEMPTS must be at least 1"));
        }

        let words = match optional(&lookup, "WORD_LIST") {
            Some(raw) => WordList::new(raw.split(',')),
            None => WordList::new(DEFAULT_WORDS.iter()),
        }
        .map_err(|e| AppError::config(format!("WORD_LIST: {e}")))?;

        let word_mode_length = parse_or(&lookup, "WORD_MODE_LENGTH", DEFAULT_WORD_MODE_LENGTH)?;
        let allow_concurrent_sessions = parse_or(&lookup, "ALLOW_CONCURRENT_SESSIONS", false)?;
        let repo_timeout_ms = parse_or(&lookup, "REPO_TIMEOUT_MS", DEFAULT_REPO_TIMEOUT_MS)?;

        Ok(Self {
            max_attempts,
            words,
            word_mode_length,
            allow_concurrent_sessions,
            repo_timeout: Duration::from_millis(repo_timeout_ms),
        })
    }
}
