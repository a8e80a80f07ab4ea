use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::accounts::AccountDirectory;
use crate::services::games::GameService;

/// Shared handles for request handlers and extractors.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<GameService>,
    /// Identity lookups for the `CurrentUser` extractor.
    pub accounts: Arc<dyn AccountDirectory>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(
        games: Arc<GameService>,
        accounts: Arc<dyn AccountDirectory>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            games,
            accounts,
            security,
        }
    }
}
