// Shared proptest configuration for domain property tests.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (default 8).
// - PROPTEST_MAX_SHRINK_MS: optional cap for shrinking time in milliseconds.

use proptest::prelude::ProptestConfig;
use time::OffsetDateTime;

use crate::domain::session::{GameMode, GameSession, GameStatus};

pub fn proptest_config() -> ProptestConfig {
    let base = ProptestConfig::default();

    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    ProptestConfig {
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}

/// Fresh playing session for state machine tests.
pub fn session(secret: &str, mode: GameMode, max_attempts: u8) -> GameSession {
    let now = OffsetDateTime::now_utc();
    GameSession {
        id: 1,
        owner_id: 10,
        name: None,
        secret_word: secret.to_string(),
        mode,
        max_attempts,
        remaining_attempts: max_attempts,
        guessed_letters: Vec::new(),
        guessed_words: Vec::new(),
        status: GameStatus::Playing,
        version: 1,
        created_at: now,
        updated_at: now,
    }
}
