use std::future::Future;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::DbConfig;
use crate::error::AppError;

/// Retry a connection attempt with fixed interval delays.
/// Returns the last error once all attempts are used.
async fn retry_connection<T, F, Fut>(mut connect_fn: F, cfg: &DbConfig) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(conn) => {
                if attempt > 1 {
                    info!(attempt, "connection_retry=success");
                }
                return Ok(conn);
            }
            Err(e) if attempt >= cfg.connect_attempts => return Err(e),
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts = cfg.connect_attempts,
                    interval_ms = cfg.connect_retry_interval.as_millis() as u64,
                    error = %e,
                    "connection_retry=failed"
                );
                tokio::time::sleep(cfg.connect_retry_interval).await;
                attempt += 1;
            }
        }
    }
}

/// Open a pool for `cfg`. Does not run migrations.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    let max_connections = if cfg.is_sqlite_memory() {
        1
    } else {
        cfg.max_connections.max(1)
    };
    opts.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(false);

    retry_connection(
        || {
            let opts = opts.clone();
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        cfg,
    )
    .await
}

/// Connect and bring the schema up to date. Single entrypoint for main and tests.
pub async fn bootstrap_db(cfg: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(cfg).await?;
    migration::migrate(&conn, MigrationCommand::Up).await?;
    info!(backend = ?conn.get_database_backend(), "database ready");
    Ok(conn)
}
