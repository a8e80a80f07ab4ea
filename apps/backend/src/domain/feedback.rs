//! Per-letter feedback for a full-word guess.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one guessed letter against the secret word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterFeedback {
    /// Right letter, right position.
    Correct,
    /// Letter occurs at another unused position of the secret.
    Misplaced,
    /// Letter has no remaining occurrence in the secret.
    Incorrect,
}

impl LetterFeedback {
    pub const fn as_str(&self) -> &'static str {
        match self {
            LetterFeedback::Correct => "correct",
            LetterFeedback::Misplaced => "misplaced",
            LetterFeedback::Incorrect => "incorrect",
        }
    }
}

impl fmt::Display for LetterFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score `guess` against `secret` using two passes.
///
/// 1. Exact matches are marked `Correct` and consume that secret position.
/// 2. Every other guess letter is `Misplaced` if it matches a secret position
///    not yet consumed (which it then consumes), otherwise `Incorrect`.
///
/// A letter that appears `k` times in the secret is credited at most `k`
/// times across the guess. Callers must reject guesses whose length differs
/// from the secret; positions past the end of the secret score `Incorrect`.
pub fn evaluate(secret: &str, guess: &str) -> Vec<LetterFeedback> {
    let secret: Vec<char> = secret.chars().collect();
    let guess: Vec<char> = guess.chars().collect();

    let mut scores = vec![LetterFeedback::Incorrect; guess.len()];
    let mut used = vec![false; secret.len()];

    // Pass 1: exact matches.
    for (i, g) in guess.iter().enumerate() {
        if secret.get(i) == Some(g) {
            scores[i] = LetterFeedback::Correct;
            used[i] = true;
        }
    }

    // Pass 2: misplaced letters against unused secret positions.
    for (i, g) in guess.iter().enumerate() {
        if scores[i] == LetterFeedback::Correct {
            continue;
        }
        let hit = secret
            .iter()
            .zip(used.iter_mut())
            .find(|(s, u)| !**u && *s == g);
        if let Some((_, u)) = hit {
            *u = true;
            scores[i] = LetterFeedback::Misplaced;
        }
    }

    scores
}

/// True when every position is `Correct`.
pub fn is_solved(feedback: &[LetterFeedback]) -> bool {
    !feedback.is_empty() && feedback.iter().all(|f| *f == LetterFeedback::Correct)
}

/// Comma separated rendering used in player-facing messages.
pub fn render(feedback: &[LetterFeedback]) -> String {
    feedback
        .iter()
        .map(LetterFeedback::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
