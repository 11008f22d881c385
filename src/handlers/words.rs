//! Word collection routes.

use axum::{
  extract::{Path, State},
  http::StatusCode,
  Json,
};
use serde_json::{json, Value};

use super::JsonBody;
use crate::auth::{AuthContext, OptionalAuth};
use crate::domain::{NewWord, Word};
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/words
pub async fn get_words(State(state): State<AppState>, auth: OptionalAuth) -> AppResult<Json<Vec<Word>>> {
  let words = state.words.get_all(auth.account_id())?;
  Ok(Json(words))
}

/// POST /api/words
pub async fn add_word(
  State(state): State<AppState>,
  auth: AuthContext,
  JsonBody(fields): JsonBody<NewWord>,
) -> AppResult<(StatusCode, Json<Value>)> {
  let word = state.words.add_word(&state.accounts, &auth.account_id, fields)?;
  Ok((
    StatusCode::CREATED,
    Json(json!({ "success": true, "message": "Word added", "word": word })),
  ))
}

/// DELETE /api/words/{word_id}
pub async fn delete_word(
  State(state): State<AppState>,
  auth: AuthContext,
  Path(word_id): Path<String>,
) -> AppResult<Json<Value>> {
  state.words.delete_word(&auth.account_id, &word_id)?;
  Ok(Json(json!({ "success": true, "message": "Word deleted" })))
}
