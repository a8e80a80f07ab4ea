//! Session repository contract.

use async_trait::async_trait;

use crate::domain::session::{GameMode, GameSession};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};

/// Input for a brand new session. Everything else starts at its initial value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub owner_id: i64,
    pub name: Option<String>,
    pub secret_word: String,
    pub mode: GameMode,
    pub max_attempts: u8,
}

#[async_trait]
pub trait SessionRepo: Send + Sync {
    /// Persist a new `playing` session and return it with its assigned id.
    async fn insert(&self, new: NewSession) -> Result<GameSession, DomainError>;

    /// Like [`SessionRepo::insert`], but the owner check and the write are one
    /// atomic step: fails with `Conflict(SessionAlreadyActive)` if the owner
    /// already has a `playing` session.
    async fn insert_exclusive(&self, new: NewSession) -> Result<GameSession, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<GameSession>, DomainError>;

    /// All sessions of one owner, oldest first.
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<GameSession>, DomainError>;

    /// Every session, oldest first.
    async fn find_all(&self) -> Result<Vec<GameSession>, DomainError>;

    async fn has_playing(&self, owner_id: i64) -> Result<bool, DomainError>;

    /// Compare-and-swap write keyed on `session.version`.
    ///
    /// Succeeds only if the stored version still equals `session.version`;
    /// returns the stored row with the bumped version. A stale version yields
    /// `Conflict(OptimisticLock)`, a missing row `NotFound(Session)`.
    async fn update(&self, session: &GameSession) -> Result<GameSession, DomainError>;
}

/// Load a session or fail with `NotFound(Session)`.
pub async fn require_session(
    repo: &dyn SessionRepo,
    id: i64,
) -> Result<GameSession, DomainError> {
    repo.find_by_id(id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Session, format!("Game {id} not found"))
    })
}

pub fn already_active() -> DomainError {
    DomainError::conflict(
        ConflictKind::SessionAlreadyActive,
        "You already have an active game",
    )
}
