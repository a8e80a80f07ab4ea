use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::adapters::{
    AccountDirectorySea, InMemoryAccountDirectory, InMemorySessionRepo, SessionRepoSea,
};
use crate::config::db::DbConfig;
use crate::config::game::GameConfig;
use crate::config::notify::NotifyConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::accounts::AccountDirectory;
use crate::repos::sessions::SessionRepo;
use crate::services::games::GameService;
use crate::services::notifications::{LogSink, NotificationDispatcher};
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for AppState, shared by main and tests.
///
/// Storage precedence: explicit repositories, then a database, then the
/// in-memory adapters.
pub struct StateBuilder {
    security_config: SecurityConfig,
    game_config: GameConfig,
    db_config: Option<DbConfig>,
    repos: Option<(Arc<dyn SessionRepo>, Arc<dyn AccountDirectory>)>,
    notifier: Option<NotificationDispatcher>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            game_config: GameConfig::default(),
            db_config: None,
            repos: None,
            notifier: None,
        }
    }

    pub fn with_db(mut self, cfg: DbConfig) -> Self {
        self.db_config = Some(cfg);
        self
    }

    pub fn with_repos(
        mut self,
        sessions: Arc<dyn SessionRepo>,
        accounts: Arc<dyn AccountDirectory>,
    ) -> Self {
        self.repos = Some((sessions, accounts));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_game_config(mut self, game_config: GameConfig) -> Self {
        self.game_config = game_config;
        self
    }

    /// Without one, a log-only dispatcher is spawned that lives as long as the state.
    pub fn with_notifier(mut self, notifier: NotificationDispatcher) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let (sessions, accounts) = match (self.repos, self.db_config) {
            (Some(repos), _) => repos,
            (None, Some(cfg)) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(&cfg).await?;
                let sessions: Arc<dyn SessionRepo> = Arc::new(SessionRepoSea::new(conn.clone()));
                let accounts: Arc<dyn AccountDirectory> = Arc::new(AccountDirectorySea::new(conn));
                (sessions, accounts)
            }
            (None, None) => {
                let sessions: Arc<dyn SessionRepo> = Arc::new(InMemorySessionRepo::new());
                let accounts: Arc<dyn AccountDirectory> =
                    Arc::new(InMemoryAccountDirectory::new());
                (sessions, accounts)
            }
        };

        let notifier = match self.notifier {
            Some(notifier) => notifier,
            None => {
                let (notifier, _worker) = NotificationDispatcher::from_config(
                    Arc::new(LogSink),
                    &NotifyConfig::default(),
                    CancellationToken::new(),
                );
                notifier
            }
        };

        let games = Arc::new(GameService::new(
            sessions,
            accounts.clone(),
            notifier,
            self.game_config,
        ));
        Ok(AppState::new(games, accounts, self.security_config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
