//! Service-level fixture: in-memory repos, a recording sink and a fast
//! retry policy.

use std::sync::Arc;
use std::time::Duration;

use backend::adapters::{InMemoryAccountDirectory, InMemorySessionRepo};
use backend::config::game::GameConfig;
use backend::domain::words::WordList;
use backend::repos::accounts::{AccountDirectory, NewAccount};
use backend::repos::sessions::SessionRepo;
use backend::services::notifications::{NotificationDispatcher, NotificationSink, RetryPolicy};
use backend::{GameService, Principal};
use backend_test_support::unique_helpers::{unique_phone, unique_str};
use tokio_util::sync::CancellationToken;

use super::recording_sink::RecordingSink;

pub fn game_config(words: &[&str]) -> GameConfig {
    GameConfig {
        words: WordList::new(words.iter().copied()).expect("valid word list"),
        ..GameConfig::default()
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
    }
}

pub struct Harness {
    pub service: GameService,
    pub sessions: Arc<dyn SessionRepo>,
    pub accounts: Arc<InMemoryAccountDirectory>,
    pub sink: Arc<RecordingSink>,
    pub cancel: CancellationToken,
}

impl Harness {
    pub fn new(config: GameConfig) -> Self {
        Self::with_sessions(config, Arc::new(InMemorySessionRepo::new()))
    }

    pub fn with_sessions(config: GameConfig, sessions: Arc<dyn SessionRepo>) -> Self {
        let sink = Arc::new(RecordingSink::default());
        let accounts = Arc::new(InMemoryAccountDirectory::new());
        let cancel = CancellationToken::new();
        let (notifier, _worker) = NotificationDispatcher::spawn(
            sink.clone() as Arc<dyn NotificationSink>,
            64,
            fast_retry(),
            cancel.clone(),
        );
        let service = GameService::new(
            sessions.clone(),
            accounts.clone() as Arc<dyn AccountDirectory>,
            notifier,
            config,
        );
        Self {
            service,
            sessions,
            accounts,
            sink,
            cancel,
        }
    }

    async fn account(&self, name: &str, is_admin: bool) -> (Principal, String) {
        let phone = unique_phone();
        let account = self
            .accounts
            .create(NewAccount {
                sub: unique_str("sub"),
                name: name.to_string(),
                phone: Some(phone.clone()),
                is_admin,
            })
            .await
            .expect("create account");
        let principal = Principal {
            user_id: account.id,
            is_admin,
        };
        (principal, phone)
    }

    pub async fn player(&self, name: &str) -> Principal {
        self.account(name, false).await.0
    }

    pub async fn player_with_phone(&self, name: &str) -> (Principal, String) {
        self.account(name, false).await
    }

    pub async fn admin(&self, name: &str) -> Principal {
        self.account(name, true).await.0
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
