//! Admin routes under `/api/admin`. Authorization happens in the game service.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::{CurrentUser, UserId};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct DeactivatedAccount {
    user_id: i64,
    name: String,
    is_active: bool,
}

/// PUT /api/admin/deactivate/{user_id}
async fn deactivate(
    user: CurrentUser,
    target: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let account = app_state
        .games
        .deactivate_account(&user.principal(), target.0)
        .await?;
    Ok(HttpResponse::Ok().json(DeactivatedAccount {
        user_id: account.id,
        name: account.name,
        is_active: account.is_active,
    }))
}

/// GET /api/admin/history
async fn all_history(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sessions = app_state.games.list_all_sessions(&user.principal()).await?;
    Ok(HttpResponse::Ok().json(sessions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/deactivate/{user_id}", web::put().to(deactivate))
        .route("/history", web::get().to(all_history));
}
