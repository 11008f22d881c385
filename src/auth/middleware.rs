//! Authentication extractors.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use super::db as auth_db;
use crate::domain::AccountId;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

pub const SESSION_COOKIE_NAME: &str = "hanzi_session";

/// Authenticated request context.
/// Add this as a handler parameter to require authentication.
/// Rejects with 401 JSON when there is no live session or its account is gone.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub account_id: AccountId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::unauthorized())?;

        let session_id = jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or_else(AppError::unauthorized)?;

        let account_id = {
            let conn = state
                .auth_db
                .lock()
                .map_err(|_| StoreError::LockPoisoned("auth db"))?;
            auth_db::get_session_account(&conn, &session_id)
                .map_err(StoreError::from)?
                .ok_or_else(AppError::unauthorized)?
        }; // Release lock before touching the accounts collection

        let account = state
            .accounts
            .find(&account_id)?
            .ok_or_else(AppError::unauthorized)?;

        Ok(AuthContext {
            account_id: account.id,
            username: account.username,
        })
    }
}

/// Optional authentication extractor.
/// Returns Some(AuthContext) if authenticated, None otherwise.
/// Use for routes that also serve anonymous callers.
pub struct OptionalAuth(pub Option<AuthContext>);

impl OptionalAuth {
    pub fn account_id(&self) -> Option<&AccountId> {
        self.0.as_ref().map(|auth| &auth.account_id)
    }
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Only a missing or stale session means anonymous; storage failures surface
        match AuthContext::from_request_parts(parts, state).await {
            Ok(auth) => Ok(OptionalAuth(Some(auth))),
            Err(AppError::Unauthorized(_)) => Ok(OptionalAuth(None)),
            Err(e) => Err(e),
        }
    }
}
