//! Game service: the command surface over sessions.
//!
//! Every call takes the caller's [`Principal`] explicitly. Writes follow a
//! load / apply / compare-and-swap cycle against the session repository and
//! are retried a bounded number of times when another writer wins the race.
//! Notifications are enqueued from a background task after a successful
//! write and never fail or delay the request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn, Instrument, Span};

use crate::auth::Principal;
use crate::config::game::GameConfig;
use crate::domain::session::{GameMode, GameSession, GuessApplied};
use crate::domain::view::{GuessOutcome, SessionView};
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind,
};
use crate::errors::ErrorCode;
use crate::repos::accounts::{Account, AccountDirectory};
use crate::repos::sessions::{require_session, NewSession, SessionRepo};
use crate::services::notifications::{messages, GameSummary, NotificationDispatcher, NotificationJob};
use crate::trace_ctx;

/// Read-apply-write cycles attempted before a lost race is reported.
pub const MAX_CAS_ATTEMPTS: u32 = 3;

pub struct GameService {
    sessions: Arc<dyn SessionRepo>,
    accounts: Arc<dyn AccountDirectory>,
    notifier: NotificationDispatcher,
    config: GameConfig,
}

impl GameService {
    pub fn new(
        sessions: Arc<dyn SessionRepo>,
        accounts: Arc<dyn AccountDirectory>,
        notifier: NotificationDispatcher,
        config: GameConfig,
    ) -> Self {
        Self {
            sessions,
            accounts,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new `playing` session owned by the caller.
    pub async fn create_session(
        &self,
        principal: &Principal,
        mode: GameMode,
        name: Option<String>,
    ) -> Result<GameSession, AppError> {
        let account = self.require_account(principal.user_id).await?;
        if !account.is_active {
            return Err(DomainError::forbidden(
                ForbiddenKind::AccountInactive,
                "Account is inactive",
            )
            .into());
        }

        let secret_word = self.config.words.pick(mode, self.config.word_mode_length)?;
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let new = NewSession {
            owner_id: account.id,
            name,
            secret_word,
            mode,
            max_attempts: self.config.max_attempts,
        };

        let session = if self.config.allow_concurrent_sessions {
            self.bounded("insert", self.sessions.insert(new)).await?
        } else {
            self.bounded("insert_exclusive", self.sessions.insert_exclusive(new))
                .await?
        };

        info!(
            session_id = session.id,
            user_id = account.id,
            mode = %session.mode,
            word_length = session.word_length(),
            "Game session created"
        );
        Ok(session)
    }

    /// Apply one guess. Rejections leave the stored session untouched.
    pub async fn submit_guess(
        &self,
        principal: &Principal,
        session_id: i64,
        input: &str,
    ) -> Result<GuessOutcome, AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut session = self.load(session_id).await?;
            ensure_owner(principal, &session)?;

            let applied = session.apply_guess(input)?;
            match self.bounded("update", self.sessions.update(&session)).await {
                Ok(saved) => {
                    debug!(
                        session_id,
                        attempt,
                        remaining_attempts = saved.remaining_attempts,
                        status = %saved.status,
                        "Guess applied"
                    );
                    self.notify_turn(&saved, &applied);
                    return Ok(GuessOutcome::new(&saved, applied.feedback));
                }
                Err(e) if e.is_optimistic_lock() && attempt < MAX_CAS_ATTEMPTS => {
                    debug!(session_id, attempt, "Concurrent write on session, retrying guess");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Owner or admin view. The secret stays masked while the game is playing.
    pub async fn view_session(
        &self,
        principal: &Principal,
        session_id: i64,
    ) -> Result<SessionView, AppError> {
        let session = self.load(session_id).await?;
        if session.owner_id != principal.user_id && !principal.is_admin {
            return Err(not_owner(session_id).into());
        }
        Ok(SessionView::from(&session))
    }

    /// Forfeit a playing session.
    pub async fn leave_session(
        &self,
        principal: &Principal,
        session_id: i64,
    ) -> Result<GameSession, AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut session = self.load(session_id).await?;
            ensure_owner(principal, &session)?;

            if let Err(e) = session.forfeit() {
                return Err(match e {
                    DomainError::Conflict(ConflictKind::GameAlreadyFinished, detail) => {
                        AppError::bad_request(ErrorCode::GameAlreadyFinished, detail)
                    }
                    other => other.into(),
                });
            }

            match self.bounded("update", self.sessions.update(&session)).await {
                Ok(saved) => {
                    info!(session_id, user_id = principal.user_id, "Player left the game");
                    self.notify_forfeit(&saved);
                    return Ok(saved);
                }
                Err(e) if e.is_optimistic_lock() && attempt < MAX_CAS_ATTEMPTS => {
                    debug!(session_id, attempt, "Concurrent write on session, retrying leave");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Sessions of `target_user`, oldest first. Self or admin only.
    pub async fn list_history(
        &self,
        principal: &Principal,
        target_user: i64,
    ) -> Result<Vec<SessionView>, AppError> {
        if principal.user_id != target_user && !principal.is_admin {
            return Err(DomainError::forbidden(
                ForbiddenKind::AdminRequired,
                "Only admins can read another player's history",
            )
            .into());
        }

        let sessions = self
            .bounded("find_by_owner", self.sessions.find_by_owner(target_user))
            .await?;
        if sessions.is_empty() {
            return Err(DomainError::not_found(
                NotFoundKind::History,
                format!("No games found for user {target_user}"),
            )
            .into());
        }
        Ok(sessions.iter().map(SessionView::from).collect())
    }

    /// Every session in the system. Admin only.
    pub async fn list_all_sessions(
        &self,
        principal: &Principal,
    ) -> Result<Vec<SessionView>, AppError> {
        ensure_admin(principal)?;

        let sessions = self.bounded("find_all", self.sessions.find_all()).await?;
        if sessions.is_empty() {
            return Err(
                DomainError::not_found(NotFoundKind::History, "No games found").into(),
            );
        }
        Ok(sessions.iter().map(SessionView::from).collect())
    }

    /// Disable an account. Admin only.
    pub async fn deactivate_account(
        &self,
        principal: &Principal,
        target_user: i64,
    ) -> Result<Account, AppError> {
        ensure_admin(principal)?;

        let account = self
            .bounded("deactivate", self.accounts.deactivate(target_user))
            .await?;
        info!(
            user_id = target_user,
            admin_id = principal.user_id,
            "Account deactivated"
        );
        Ok(account)
    }

    async fn load(&self, session_id: i64) -> Result<GameSession, DomainError> {
        self.bounded(
            "find_by_id",
            require_session(self.sessions.as_ref(), session_id),
        )
        .await
    }

    async fn require_account(&self, user_id: i64) -> Result<Account, DomainError> {
        self.bounded("find_account", self.accounts.find_by_id(user_id))
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
            })
    }

    /// Run a repository call under the configured timeout.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, DomainError>>,
    {
        bounded(self.config.repo_timeout, op, fut).await
    }

    fn notify_turn(&self, session: &GameSession, applied: &GuessApplied) {
        let body = messages::turn_message(session, applied);
        self.spawn_notification(session.clone(), body, session.status.is_terminal());
    }

    fn notify_forfeit(&self, session: &GameSession) {
        let body = messages::forfeit_message(session);
        self.spawn_notification(session.clone(), body, true);
    }

    /// Owner lookup and enqueue run on their own task so the caller's
    /// response never waits on them.
    fn spawn_notification(&self, session: GameSession, body: String, with_summary: bool) {
        let accounts = self.accounts.clone();
        let notifier = self.notifier.clone();
        let timeout = self.config.repo_timeout;
        let task = async move {
            let Some(account) = notification_target(accounts.as_ref(), timeout, &session).await
            else {
                return;
            };
            text_player(&notifier, &account, session.id, body);
            if with_summary {
                publish_summary(&notifier, &session, &account);
            }
        };
        tokio::spawn(
            trace_ctx::with_trace_id(trace_ctx::trace_id(), task).instrument(Span::current()),
        );
    }
}

async fn bounded<T, F>(timeout: Duration, op: &'static str, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                op,
                timeout_ms = timeout.as_millis() as u64,
                "Repository call timed out"
            );
            Err(DomainError::infra(
                InfraErrorKind::Timeout,
                format!("Repository call '{op}' timed out"),
            ))
        }
    }
}

/// Owner lookup for notifications. Failures are logged and swallowed.
async fn notification_target(
    accounts: &dyn AccountDirectory,
    timeout: Duration,
    session: &GameSession,
) -> Option<Account> {
    match bounded(timeout, "find_account", accounts.find_by_id(session.owner_id)).await {
        Ok(Some(account)) => Some(account),
        Ok(None) => {
            warn!(
                session_id = session.id,
                user_id = session.owner_id,
                "Session owner missing, notifications skipped"
            );
            None
        }
        Err(e) => {
            warn!(
                session_id = session.id,
                error = %e,
                "Owner lookup failed, notifications skipped"
            );
            None
        }
    }
}

fn text_player(
    notifier: &NotificationDispatcher,
    account: &Account,
    session_id: i64,
    body: String,
) {
    match &account.phone {
        Some(phone) => {
            notifier.enqueue(NotificationJob::Message {
                to: phone.clone(),
                body,
            });
        }
        None => debug!(
            session_id,
            user_id = account.id,
            "No phone on account, turn text skipped"
        ),
    }
}

fn publish_summary(notifier: &NotificationDispatcher, session: &GameSession, account: &Account) {
    let summary = GameSummary::new(session, &account.name);
    if notifier.enqueue(NotificationJob::Summary(summary)) {
        debug!(session_id = session.id, status = %session.status, "Game summary queued");
    }
}

fn not_owner(session_id: i64) -> DomainError {
    DomainError::forbidden(
        ForbiddenKind::NotOwner,
        format!("Game {session_id} belongs to another player"),
    )
}

fn ensure_owner(principal: &Principal, session: &GameSession) -> Result<(), DomainError> {
    if session.owner_id == principal.user_id {
        Ok(())
    } else {
        Err(not_owner(session.id))
    }
}

fn ensure_admin(principal: &Principal) -> Result<(), DomainError> {
    if principal.is_admin {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::AdminRequired,
            "Admin privileges required",
        ))
    }
}
