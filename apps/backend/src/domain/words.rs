//! Secret word corpus and random selection.

use rand::seq::IndexedRandom;

use crate::domain::session::GameMode;
use crate::errors::domain::{DomainError, InfraErrorKind};

pub const DEFAULT_WORDS: &[&str] = &["gato", "perro", "elefante", "jirafa", "zebra"];

/// Normalized, de-duplicated list of candidate secret words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build a list from raw entries. Entries are trimmed and lowercased;
    /// blanks are skipped. Non-alphabetic entries and an empty result are
    /// configuration errors.
    pub fn new<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = Vec::new();
        for entry in raw {
            let word = entry.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if !word.chars().all(char::is_alphabetic) {
                return Err(DomainError::infra(
                    InfraErrorKind::Other("config".into()),
                    format!("word list entry '{word}' must contain letters only"),
                ));
            }
            if !words.contains(&word) {
                words.push(word);
            }
        }

        if words.is_empty() {
            return Err(DomainError::infra(
                InfraErrorKind::Other("config".into()),
                "word list must contain at least one word",
            ));
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Candidates for a mode. Word mode only uses words of `word_len` letters;
    /// letter mode accepts any length.
    pub fn candidates(&self, mode: GameMode, word_len: usize) -> Vec<&str> {
        self.words
            .iter()
            .filter(|w| match mode {
                GameMode::LetterGuess => true,
                GameMode::WordGuess => w.chars().count() == word_len,
            })
            .map(String::as_str)
            .collect()
    }

    /// Uniform random pick among the mode's candidates.
    pub fn pick(&self, mode: GameMode, word_len: usize) -> Result<String, DomainError> {
        let candidates = self.candidates(mode, word_len);
        let mut rng = rand::rng();
        candidates
            .choose(&mut rng)
            .map(|w| (*w).to_string())
            .ok_or_else(|| {
                DomainError::infra(
                    InfraErrorKind::Other("config".into()),
                    format!("no {word_len}-letter words configured for {mode}"),
                )
            })
    }
}

impl Default for WordList {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }
}
