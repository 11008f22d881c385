//! Authentication route handlers (JSON).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use serde_json::json;

use super::db as auth_db;
use super::middleware::{AuthContext, OptionalAuth, SESSION_COOKIE_NAME};
use crate::config::SESSION_DURATION_HOURS;
use crate::domain::{Account, PublicAccount};
use crate::error::{AppError, AppResult};
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::store::StoreError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..32)
        .map(|_| {
            let idx = rng.random_range(0..36u8);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'a' + idx - 10) as char
            }
        })
        .collect()
}

/// Create a session row for `account` and return the cookie that carries it
fn start_session(state: &AppState, account: &Account) -> AppResult<Cookie<'static>> {
    let session_id = generate_session_id();
    let conn = state
        .auth_db
        .lock()
        .map_err(|_| StoreError::LockPoisoned("auth db"))?;
    auth_db::create_session(&conn, &account.id, &session_id, SESSION_DURATION_HOURS)
        .map_err(StoreError::from)?;

    Ok(Cookie::build((SESSION_COOKIE_NAME, session_id))
        .path("/")
        .http_only(true)
        .secure(false) // Set to true in production with HTTPS
        .max_age(time::Duration::hours(SESSION_DURATION_HOURS))
        .build())
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AppResult<Response> {
    let account = state
        .accounts
        .register(&req.username, &req.password, req.email.as_deref())?;
    let cookie = start_session(&state, &account)?;

    Ok((
        StatusCode::CREATED,
        jar.add(cookie),
        Json(json!({
            "success": true,
            "message": "Registration successful",
            "user": PublicAccount::from(&account),
        })),
    )
        .into_response())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<Response> {
    let account = state.accounts.authenticate(&req.username, &req.password)?;
    let cookie = start_session(&state, &account)?;
    tracing::info!("Account {} logged in", account.username);

    Ok((
        jar.add(cookie),
        Json(json!({
            "success": true,
            "message": "Login successful",
            "user": PublicAccount::from(&account),
        })),
    )
        .into_response())
}

/// POST /api/auth/logout - always succeeds
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session_cookie) = jar.get(SESSION_COOKIE_NAME) {
        let session_id = session_cookie.value();
        if let Ok(conn) = state.auth_db.lock() {
            if let Err(e) = auth_db::delete_session(&conn, session_id) {
                tracing::warn!("Failed to delete session during logout: {}", e);
            }
        }
    }

    let session_cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (
        jar.remove(session_cookie),
        Json(json!({ "success": true, "message": "Logged out" })),
    )
}

/// GET /api/auth/check
pub async fn check(State(state): State<AppState>, auth: OptionalAuth) -> AppResult<Json<serde_json::Value>> {
    let Some(auth) = auth.0 else {
        return Ok(Json(json!({ "authenticated": false })));
    };

    match state.accounts.find(&auth.account_id)? {
        Some(account) => Ok(Json(json!({
            "authenticated": true,
            "user": PublicAccount::from(&account),
        }))),
        None => Ok(Json(json!({ "authenticated": false }))),
    }
}

/// GET /api/auth/stats
pub async fn stats(State(state): State<AppState>, auth: AuthContext) -> AppResult<Json<serde_json::Value>> {
    let account = state
        .accounts
        .find(&auth.account_id)?
        .ok_or_else(AppError::unauthorized)?;

    Ok(Json(json!({ "success": true, "stats": account.stats })))
}
