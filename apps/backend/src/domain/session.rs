//! Game session data and its state machine.
//!
//! A session starts `Playing` and moves to `Won` or `Lost` exactly once.
//! Rejected input never touches `remaining_attempts`, the guess history or
//! `status`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::feedback::{self, LetterFeedback};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Placeholder for unrevealed letters in the letter-mode mask.
pub const MASK_CHAR: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One letter per turn; correct letters are revealed in a mask.
    #[serde(rename = "letter-guess")]
    LetterGuess,
    /// Whole word per turn; each attempt gets per-letter feedback.
    #[serde(rename = "word-guess")]
    WordGuess,
}

impl GameMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameMode::LetterGuess => "letter-guess",
            GameMode::WordGuess => "word-guess",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "letter-guess" => Ok(GameMode::LetterGuess),
            "word-guess" => Ok(GameMode::WordGuess),
            other => Err(DomainError::infra(
                crate::errors::domain::InfraErrorKind::DataCorruption,
                format!("unknown game mode: {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "playing" => Ok(GameStatus::Playing),
            "won" => Ok(GameStatus::Won),
            "lost" => Ok(GameStatus::Lost),
            other => Err(DomainError::infra(
                crate::errors::domain::InfraErrorKind::DataCorruption,
                format!("unknown game status: {other}"),
            )),
        }
    }
}

/// One full-word attempt with its feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    pub guess: String,
    pub feedback: Vec<LetterFeedback>,
}

/// Feedback for a single applied guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuessFeedback {
    Letter {
        letter: char,
        hit: bool,
        positions: Vec<usize>,
        masked_word: String,
    },
    Word {
        guess: String,
        feedback: Vec<LetterFeedback>,
    },
}

/// Result of a successfully applied guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessApplied {
    pub feedback: GuessFeedback,
    pub attempt_consumed: bool,
    pub status: GameStatus,
    pub remaining_attempts: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub id: i64,
    pub owner_id: i64,
    pub name: Option<String>,
    pub secret_word: String,
    pub mode: GameMode,
    pub max_attempts: u8,
    pub remaining_attempts: u8,
    pub guessed_letters: Vec<char>,
    pub guessed_words: Vec<GuessRecord>,
    pub status: GameStatus,
    /// Compare-and-swap token; bumped by the repository on every write.
    pub version: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Trim and lowercase raw player input.
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl GameSession {
    pub fn word_length(&self) -> usize {
        self.secret_word.chars().count()
    }

    pub fn attempts_used(&self) -> u8 {
        self.max_attempts.saturating_sub(self.remaining_attempts)
    }

    /// Secret word with unguessed letters replaced by `MASK_CHAR`.
    pub fn masked_word(&self) -> String {
        self.secret_word
            .chars()
            .map(|c| {
                if self.guessed_letters.contains(&c) {
                    c
                } else {
                    MASK_CHAR
                }
            })
            .collect()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.secret_word
            .chars()
            .all(|c| self.guessed_letters.contains(&c))
    }

    /// Validate and apply one guess.
    ///
    /// Errors leave the session untouched.
    pub fn apply_guess(&mut self, raw: &str) -> Result<GuessApplied, DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyFinished,
                format!("Game {} is already {}", self.id, self.status),
            ));
        }

        let guess = normalize_guess(raw);
        if guess.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyGuess,
                "Guess must not be empty",
            ));
        }
        if !guess.chars().all(char::is_alphabetic) {
            return Err(DomainError::validation(
                ValidationKind::NotAlphabetic,
                "Guess must contain letters only",
            ));
        }

        match self.mode {
            GameMode::LetterGuess => self.apply_letter(&guess),
            GameMode::WordGuess => self.apply_word(guess),
        }
    }

    fn apply_letter(&mut self, guess: &str) -> Result<GuessApplied, DomainError> {
        let mut chars = guess.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::WrongLength,
                    "Letter mode accepts exactly one letter per guess",
                ))
            }
        };

        if self.guessed_letters.contains(&letter) {
            return Err(DomainError::validation(
                ValidationKind::RepeatedGuess,
                format!("Letter '{letter}' was already guessed"),
            ));
        }

        let positions: Vec<usize> = self
            .secret_word
            .chars()
            .enumerate()
            .filter(|(_, c)| *c == letter)
            .map(|(i, _)| i)
            .collect();
        let hit = !positions.is_empty();

        self.guessed_letters.push(letter);
        if !hit {
            self.remaining_attempts = self.remaining_attempts.saturating_sub(1);
        }

        if self.is_fully_revealed() {
            self.status = GameStatus::Won;
        } else if self.remaining_attempts == 0 {
            self.status = GameStatus::Lost;
        }

        Ok(GuessApplied {
            feedback: GuessFeedback::Letter {
                letter,
                hit,
                positions,
                masked_word: self.masked_word(),
            },
            attempt_consumed: !hit,
            status: self.status,
            remaining_attempts: self.remaining_attempts,
        })
    }

    fn apply_word(&mut self, guess: String) -> Result<GuessApplied, DomainError> {
        let expected = self.word_length();
        let got = guess.chars().count();
        if got != expected {
            return Err(DomainError::validation(
                ValidationKind::WrongLength,
                format!("Guess must have exactly {expected} letters, got {got}"),
            ));
        }

        if self.guessed_words.iter().any(|r| r.guess == guess) {
            return Err(DomainError::validation(
                ValidationKind::RepeatedGuess,
                format!("Word '{guess}' was already guessed"),
            ));
        }

        let scores = feedback::evaluate(&self.secret_word, &guess);
        let solved = guess == self.secret_word;

        self.remaining_attempts = self.remaining_attempts.saturating_sub(1);
        self.guessed_words.push(GuessRecord {
            guess: guess.clone(),
            feedback: scores.clone(),
        });

        if solved {
            self.status = GameStatus::Won;
        } else if self.remaining_attempts == 0 {
            self.status = GameStatus::Lost;
        }

        Ok(GuessApplied {
            feedback: GuessFeedback::Word {
                guess,
                feedback: scores,
            },
            attempt_consumed: true,
            status: self.status,
            remaining_attempts: self.remaining_attempts,
        })
    }

    /// Player-initiated loss. Only valid while playing.
    pub fn forfeit(&mut self) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyFinished,
                format!("Game {} is already {}", self.id, self.status),
            ));
        }
        self.status = GameStatus::Lost;
        Ok(())
    }
}
