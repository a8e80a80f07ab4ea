//! Player-facing projections of a session.
//!
//! The secret word only appears once the session is terminal.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::session::{GameMode, GameSession, GameStatus, GuessFeedback, GuessRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub id: i64,
    pub owner_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mode: GameMode,
    pub status: GameStatus,
    pub max_attempts: u8,
    pub remaining_attempts: u8,
    pub word_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_word: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guessed_letters: Vec<char>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guesses: Vec<GuessRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&GameSession> for SessionView {
    fn from(s: &GameSession) -> Self {
        let masked_word = match s.mode {
            GameMode::LetterGuess => Some(s.masked_word()),
            GameMode::WordGuess => None,
        };
        Self {
            id: s.id,
            owner_id: s.owner_id,
            name: s.name.clone(),
            mode: s.mode,
            status: s.status,
            max_attempts: s.max_attempts,
            remaining_attempts: s.remaining_attempts,
            word_length: s.word_length(),
            masked_word,
            guessed_letters: s.guessed_letters.clone(),
            guesses: s.guessed_words.clone(),
            secret_word: revealed_secret(s),
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Response body for a successful guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessOutcome {
    pub session_id: i64,
    pub feedback: GuessFeedback,
    pub remaining_attempts: u8,
    pub status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_word: Option<String>,
}

impl GuessOutcome {
    pub fn new(session: &GameSession, feedback: GuessFeedback) -> Self {
        Self {
            session_id: session.id,
            feedback,
            remaining_attempts: session.remaining_attempts,
            status: session.status,
            secret_word: revealed_secret(session),
        }
    }
}

fn revealed_secret(s: &GameSession) -> Option<String> {
    s.status.is_terminal().then(|| s.secret_word.clone())
}
