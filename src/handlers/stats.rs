//! Stat update routes.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{JsonBody, JsonOrDefault};
use crate::auth::AuthContext;
use crate::domain::StatCounter;
use crate::error::AppResult;
use crate::state::AppState;

fn one() -> i64 {
  1
}

#[derive(Deserialize)]
pub struct StatUpdate {
  #[serde(rename = "type", default)]
  pub counter: String,
  #[serde(default = "one")]
  pub value: i64,
}

#[derive(Deserialize)]
pub struct GameFinished {
  #[serde(default = "one")]
  pub games_played: i64,
}

impl Default for GameFinished {
  fn default() -> Self {
    Self { games_played: 1 }
  }
}

/// POST /api/auth/stats/update
pub async fn update_stats(
  State(state): State<AppState>,
  auth: AuthContext,
  JsonBody(update): JsonBody<StatUpdate>,
) -> AppResult<Json<Value>> {
  let stats = state
    .accounts
    .increment_named(&auth.account_id, &update.counter, update.value)?;
  Ok(Json(json!({ "success": true, "stats": stats })))
}

/// POST /api/game/finish
pub async fn finish_game(
  State(state): State<AppState>,
  auth: AuthContext,
  JsonOrDefault(game): JsonOrDefault<GameFinished>,
) -> AppResult<Json<Value>> {
  let stats = state
    .accounts
    .increment(&auth.account_id, StatCounter::GamesPlayed, game.games_played)?;
  Ok(Json(json!({ "success": true, "stats": stats })))
}
