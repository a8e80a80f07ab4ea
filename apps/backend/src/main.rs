use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::config::db::DbConfig;
use backend::config::game::GameConfig;
use backend::config::notify::NotifyConfig;
use backend::config::{env_lookup, parse_or};
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::services::notifications::{CompositeSink, NotificationDispatcher};
use backend::state::security_config::SecurityConfig;
use backend::telemetry;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

fn fatal(what: &str, e: impl std::fmt::Display) -> ! {
    error!(error = %e, "{what}");
    eprintln!("❌ {what}: {e}");
    std::process::exit(1);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let host = env_lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let port: u16 = parse_or(&env_lookup, "BACKEND_PORT", 3001)
        .unwrap_or_else(|e| fatal("Invalid BACKEND_PORT", e));

    let security = SecurityConfig::from_env()
        .unwrap_or_else(|e| fatal("Invalid security configuration", e));
    let db_config = DbConfig::from_env().unwrap_or_else(|e| fatal("Invalid database configuration", e));
    let game_config = GameConfig::from_env().unwrap_or_else(|e| fatal("Invalid game configuration", e));
    let notify_config =
        NotifyConfig::from_env().unwrap_or_else(|e| fatal("Invalid notification configuration", e));

    let sink = CompositeSink::from_config(&notify_config)
        .unwrap_or_else(|e| fatal("Failed to build notification channels", e));
    let shutdown = CancellationToken::new();
    let (notifier, worker) =
        NotificationDispatcher::from_config(Arc::new(sink), &notify_config, shutdown.clone());

    let app_state = build_state()
        .with_db(db_config)
        .with_security(security)
        .with_game_config(game_config)
        .with_notifier(notifier)
        .build()
        .await
        .unwrap_or_else(|e| fatal("Failed to build application state", e));

    info!(%host, port, "Starting Guessword backend");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    info!("HTTP server stopped, shutting down notification worker");
    shutdown.cancel();
    if let Err(e) = worker.await {
        error!(error = %e, "Notification worker ended abnormally");
    }
    Ok(())
}
