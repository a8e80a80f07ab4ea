//! Domain layer: pure game logic types and helpers.

pub mod feedback;
pub mod session;
pub mod view;
pub mod words;

#[cfg(test)]
mod test_prelude;

// Re-exports for ergonomics
pub use feedback::{evaluate, LetterFeedback};
pub use session::{GameMode, GameSession, GameStatus, GuessApplied, GuessFeedback, GuessRecord};
pub use view::{GuessOutcome, SessionView};
pub use words::WordList;
