//! In-process adapters with the same contract as the SeaORM ones.
//!
//! Used by tests and by database-less local runs. The session store keeps the
//! compare-and-swap semantics: a write only lands if the caller saw the
//! current version.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use time::OffsetDateTime;

use crate::domain::session::{GameSession, GameStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::accounts::{Account, AccountDirectory, NewAccount};
use crate::repos::sessions::{already_active, NewSession, SessionRepo};

#[derive(Debug, Default)]
pub struct InMemorySessionRepo {
    rows: DashMap<i64, GameSession>,
    next_id: AtomicI64,
    latency: Option<Duration>,
    // Serializes exclusive inserts so the owner check and the write cannot interleave.
    creating: Mutex<()>,
}

impl InMemorySessionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call, for exercising caller timeouts.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    async fn pause(&self) {
        if let Some(d) = self.latency {
            tokio::time::sleep(d).await;
        }
    }

    fn playing_for(&self, owner_id: i64) -> bool {
        self.rows
            .iter()
            .any(|r| r.owner_id == owner_id && r.status == GameStatus::Playing)
    }

    fn insert_row(&self, new: NewSession) -> GameSession {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = OffsetDateTime::now_utc();
        let session = GameSession {
            id,
            owner_id: new.owner_id,
            name: new.name,
            secret_word: new.secret_word,
            mode: new.mode,
            max_attempts: new.max_attempts,
            remaining_attempts: new.max_attempts,
            guessed_letters: Vec::new(),
            guessed_words: Vec::new(),
            status: GameStatus::Playing,
            version: 1,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(id, session.clone());
        session
    }

    fn sorted(mut sessions: Vec<GameSession>) -> Vec<GameSession> {
        sessions.sort_by_key(|s| s.id);
        sessions
    }
}

#[async_trait]
impl SessionRepo for InMemorySessionRepo {
    async fn insert(&self, new: NewSession) -> Result<GameSession, DomainError> {
        self.pause().await;
        Ok(self.insert_row(new))
    }

    async fn insert_exclusive(&self, new: NewSession) -> Result<GameSession, DomainError> {
        self.pause().await;
        let _creating = self.creating.lock();
        if self.playing_for(new.owner_id) {
            return Err(already_active());
        }
        Ok(self.insert_row(new))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GameSession>, DomainError> {
        self.pause().await;
        Ok(self.rows.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<GameSession>, DomainError> {
        self.pause().await;
        let found = self
            .rows
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .map(|r| r.value().clone())
            .collect();
        Ok(Self::sorted(found))
    }

    async fn find_all(&self) -> Result<Vec<GameSession>, DomainError> {
        self.pause().await;
        let all = self.rows.iter().map(|r| r.value().clone()).collect();
        Ok(Self::sorted(all))
    }

    async fn has_playing(&self, owner_id: i64) -> Result<bool, DomainError> {
        self.pause().await;
        Ok(self.playing_for(owner_id))
    }

    async fn update(&self, session: &GameSession) -> Result<GameSession, DomainError> {
        self.pause().await;
        // The shard write lock is held for the whole check-and-set.
        let mut entry = self.rows.get_mut(&session.id).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Session,
                format!("Game {} not found", session.id),
            )
        })?;

        if entry.version != session.version {
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!(
                    "Game was modified concurrently (expected version {}, actual version {}). Please retry.",
                    session.version, entry.version
                ),
            ));
        }

        let mut stored = session.clone();
        stored.version = session.version + 1;
        stored.updated_at = OffsetDateTime::now_utc();
        *entry = stored.clone();
        Ok(stored)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<BTreeMap<i64, Account>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().get(&id).cloned())
    }

    async fn find_by_sub(&self, sub: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .values()
            .find(|a| a.sub == sub)
            .cloned())
    }

    async fn create(&self, new: NewAccount) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write();
        if accounts.values().any(|a| a.sub == new.sub) {
            return Err(DomainError::conflict(
                ConflictKind::UniqueSub,
                "Account already exists",
            ));
        }
        let id = accounts.keys().next_back().copied().unwrap_or(0) + 1;
        let account = Account {
            id,
            sub: new.sub,
            name: new.name,
            phone: new.phone,
            is_active: true,
            is_admin: new.is_admin,
        };
        accounts.insert(id, account.clone());
        Ok(account)
    }

    async fn deactivate(&self, id: i64) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write();
        let account = accounts.get_mut(&id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::User, format!("User {id} not found"))
        })?;
        if !account.is_active {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInactive,
                format!("User {id} is already inactive"),
            ));
        }
        account.is_active = false;
        Ok(account.clone())
    }
}
