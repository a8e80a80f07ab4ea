//! Player routes under `/api/games`.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::session::GameMode;
use crate::domain::view::SessionView;
use crate::error::AppError;
use crate::extractors::{CurrentUser, SessionId, UserId, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub mode: GameMode,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub guess: String,
}

/// POST /api/games
async fn create_game(
    user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateGameRequest { mode, name } = body.into_inner();
    let session = app_state
        .games
        .create_session(&user.principal(), mode, name)
        .await?;
    Ok(HttpResponse::Created().json(SessionView::from(&session)))
}

/// POST /api/games/{session_id}/guess
async fn submit_guess(
    user: CurrentUser,
    session_id: SessionId,
    body: ValidatedJson<GuessRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = app_state
        .games
        .submit_guess(&user.principal(), session_id.0, &body.guess)
        .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// GET /api/games/{session_id}
async fn get_game(
    user: CurrentUser,
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let view = app_state
        .games
        .view_session(&user.principal(), session_id.0)
        .await?;
    Ok(HttpResponse::Ok().json(view))
}

/// POST /api/games/{session_id}/leave
async fn leave_game(
    user: CurrentUser,
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = app_state
        .games
        .leave_session(&user.principal(), session_id.0)
        .await?;
    Ok(HttpResponse::Ok().json(SessionView::from(&session)))
}

/// GET /api/games/history/{user_id}
async fn history(
    user: CurrentUser,
    target: UserId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sessions = app_state
        .games
        .list_history(&user.principal(), target.0)
        .await?;
    Ok(HttpResponse::Ok().json(sessions))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_game))
        .route("/history/{user_id}", web::get().to(history))
        .route("/{session_id}", web::get().to(get_game))
        .route("/{session_id}/guess", web::post().to(submit_guess))
        .route("/{session_id}/leave", web::post().to(leave_game));
}
