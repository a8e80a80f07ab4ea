use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::jwt::Claims;
use crate::auth::Principal;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::accounts::Account;
use crate::state::app_state::AppState;

/// Caller resolved from the bearer token claims through the account directory.
///
/// Requires `JwtExtract` on the enclosing scope.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account: Account,
}

impl CurrentUser {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.account.id,
            is_admin: self.account.is_admin,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let claims = claims.ok_or_else(AppError::unauthorized_missing_bearer)?;
            let app_state =
                app_state.ok_or_else(|| AppError::internal("AppState not available"))?;

            let account = app_state
                .accounts
                .find_by_sub(&claims.sub)
                .await?
                .ok_or_else(|| {
                    security::unknown_subject(&claims.sub);
                    AppError::forbidden_user_not_found()
                })?;

            Ok(CurrentUser { account })
        })
    }
}
