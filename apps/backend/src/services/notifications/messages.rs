//! Player-facing text for per-turn notifications.

use crate::domain::feedback;
use crate::domain::session::{GameSession, GameStatus, GuessApplied, GuessFeedback};

/// Text sent to the player after an accepted guess.
pub fn turn_message(session: &GameSession, applied: &GuessApplied) -> String {
    match (applied.status, &applied.feedback) {
        (GameStatus::Won, _) => {
            format!("Congrats, you guessed the word: {}", session.secret_word)
        }
        (GameStatus::Lost, _) => format!("You lost, the word was: {}", session.secret_word),
        (GameStatus::Playing, GuessFeedback::Word { guess, feedback }) => format!(
            "Your guess: {guess}. Feedback: {}. Attempts left: {}",
            feedback::render(feedback),
            applied.remaining_attempts
        ),
        (
            GameStatus::Playing,
            GuessFeedback::Letter {
                letter,
                hit,
                masked_word,
                ..
            },
        ) => {
            let verdict = if *hit { "is" } else { "is not" };
            format!(
                "Letter '{letter}' {verdict} in the word: {masked_word}. Attempts left: {}",
                applied.remaining_attempts
            )
        }
    }
}

/// Text sent when the player leaves a game.
pub fn forfeit_message(session: &GameSession) -> String {
    format!(
        "You lost! You left the game. The word was: {}",
        session.secret_word
    )
}
