//! SeaORM adapter for the session repository.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use time::OffsetDateTime;

use crate::domain::session::{GameMode, GameSession, GameStatus, GuessRecord};
use crate::entities::game_sessions::{self, SessionMode, SessionStatus};
use crate::entities::users;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::{self, optimistic_lock_err, SESSION_NOT_FOUND_PREFIX};
use crate::repos::sessions::{already_active, NewSession, SessionRepo};

impl From<GameMode> for SessionMode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::LetterGuess => SessionMode::LetterGuess,
            GameMode::WordGuess => SessionMode::WordGuess,
        }
    }
}

impl From<SessionMode> for GameMode {
    fn from(mode: SessionMode) -> Self {
        match mode {
            SessionMode::LetterGuess => GameMode::LetterGuess,
            SessionMode::WordGuess => GameMode::WordGuess,
        }
    }
}

impl From<GameStatus> for SessionStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Playing => SessionStatus::Playing,
            GameStatus::Won => SessionStatus::Won,
            GameStatus::Lost => SessionStatus::Lost,
        }
    }
}

impl From<SessionStatus> for GameStatus {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Playing => GameStatus::Playing,
            SessionStatus::Won => GameStatus::Won,
            SessionStatus::Lost => GameStatus::Lost,
        }
    }
}

fn corrupt(id: i64, what: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("game_sessions row {id}: {what}"),
    )
}

fn encode_words(id: i64, words: &[GuessRecord]) -> Result<String, DomainError> {
    serde_json::to_string(words).map_err(|e| corrupt(id, e))
}

fn to_domain(row: game_sessions::Model) -> Result<GameSession, DomainError> {
    let guessed_words: Vec<GuessRecord> =
        serde_json::from_str(&row.guessed_words).map_err(|e| corrupt(row.id, e))?;
    let max_attempts =
        u8::try_from(row.max_attempts).map_err(|_| corrupt(row.id, "max_attempts out of range"))?;
    let remaining_attempts = u8::try_from(row.remaining_attempts)
        .map_err(|_| corrupt(row.id, "remaining_attempts out of range"))?;

    Ok(GameSession {
        id: row.id,
        owner_id: row.owner_id,
        name: row.name,
        secret_word: row.secret_word,
        mode: row.mode.into(),
        max_attempts,
        remaining_attempts,
        guessed_letters: row.guessed_letters.chars().collect(),
        guessed_words,
        status: row.status.into(),
        version: row.lock_version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

async fn insert_row<C>(conn: &C, new: NewSession) -> Result<game_sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
{
    let now = OffsetDateTime::now_utc();
    game_sessions::ActiveModel {
        id: NotSet,
        owner_id: Set(new.owner_id),
        name: Set(new.name),
        secret_word: Set(new.secret_word),
        mode: Set(new.mode.into()),
        max_attempts: Set(i16::from(new.max_attempts)),
        remaining_attempts: Set(i16::from(new.max_attempts)),
        guessed_letters: Set(String::new()),
        guessed_words: Set("[]".to_string()),
        status: Set(SessionStatus::Playing),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

async fn count_playing<C>(conn: &C, owner_id: i64) -> Result<u64, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
{
    game_sessions::Entity::find()
        .filter(game_sessions::Column::OwnerId.eq(owner_id))
        .filter(game_sessions::Column::Status.eq(SessionStatus::Playing))
        .count(conn)
        .await
}

/// Apply the session's mutable columns guarded by its lock version, then
/// refetch. Zero affected rows means the row vanished or the version moved.
async fn optimistic_update_then_fetch<C>(
    conn: &C,
    session: &GameSession,
    guessed_words: String,
) -> Result<game_sessions::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
{
    let now = OffsetDateTime::now_utc();
    let letters: String = session.guessed_letters.iter().collect();

    let result = game_sessions::Entity::update_many()
        .col_expr(
            game_sessions::Column::RemainingAttempts,
            Expr::val(i16::from(session.remaining_attempts)).into(),
        )
        .col_expr(game_sessions::Column::GuessedLetters, Expr::val(letters).into())
        .col_expr(game_sessions::Column::GuessedWords, Expr::val(guessed_words).into())
        .col_expr(
            game_sessions::Column::Status,
            Expr::val(SessionStatus::from(session.status)).into(),
        )
        .col_expr(game_sessions::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            game_sessions::Column::LockVersion,
            Expr::col(game_sessions::Column::LockVersion).add(1),
        )
        .filter(game_sessions::Column::Id.eq(session.id))
        .filter(game_sessions::Column::LockVersion.eq(session.version))
        .exec(conn)
        .await?;

    let missing = || sea_orm::DbErr::Custom(format!("{SESSION_NOT_FOUND_PREFIX}{}", session.id));

    if result.rows_affected == 0 {
        return match game_sessions::Entity::find_by_id(session.id).one(conn).await? {
            Some(current) => Err(optimistic_lock_err(session.version, current.lock_version)),
            None => Err(missing()),
        };
    }

    game_sessions::Entity::find_by_id(session.id)
        .one(conn)
        .await?
        .ok_or_else(missing)
}

/// SeaORM implementation of `SessionRepo`.
#[derive(Debug, Clone)]
pub struct SessionRepoSea {
    db: DatabaseConnection,
}

impl SessionRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepo for SessionRepoSea {
    async fn insert(&self, new: NewSession) -> Result<GameSession, DomainError> {
        let row = insert_row(&self.db, new)
            .await
            .map_err(db_errors::map_db_err)?;
        to_domain(row)
    }

    async fn insert_exclusive(&self, new: NewSession) -> Result<GameSession, DomainError> {
        let txn = self.db.begin().await.map_err(db_errors::map_db_err)?;

        // Row lock on the owner serializes concurrent creates for the same player.
        // SQLite has no FOR UPDATE; its writers are already serialized.
        users::Entity::find_by_id(new.owner_id)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(db_errors::map_db_err)?;

        let playing = count_playing(&txn, new.owner_id)
            .await
            .map_err(db_errors::map_db_err)?;
        if playing > 0 {
            // Dropping the transaction rolls it back.
            return Err(already_active());
        }

        let row = insert_row(&txn, new)
            .await
            .map_err(db_errors::map_db_err)?;
        txn.commit().await.map_err(db_errors::map_db_err)?;
        to_domain(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<GameSession>, DomainError> {
        game_sessions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_errors::map_db_err)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<GameSession>, DomainError> {
        game_sessions::Entity::find()
            .filter(game_sessions::Column::OwnerId.eq(owner_id))
            .order_by_asc(game_sessions::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_errors::map_db_err)?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn find_all(&self) -> Result<Vec<GameSession>, DomainError> {
        game_sessions::Entity::find()
            .order_by_asc(game_sessions::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_errors::map_db_err)?
            .into_iter()
            .map(to_domain)
            .collect()
    }

    async fn has_playing(&self, owner_id: i64) -> Result<bool, DomainError> {
        let count = count_playing(&self.db, owner_id)
            .await
            .map_err(db_errors::map_db_err)?;
        Ok(count > 0)
    }

    async fn update(&self, session: &GameSession) -> Result<GameSession, DomainError> {
        let words = encode_words(session.id, &session.guessed_words)?;
        let row = optimistic_update_then_fetch(&self.db, session, words)
            .await
            .map_err(db_errors::map_db_err)?;
        to_domain(row)
    }
}
