//! Practice and answer-check routes.

use axum::{extract::State, Json};
use serde::Deserialize;
use std::collections::HashSet;

use super::{JsonBody, JsonOrDefault};
use crate::auth::OptionalAuth;
use crate::domain::word::deserialize_opt_loose_id;
use crate::domain::Word;
use crate::error::{AppError, AppResult};
use crate::practice::select_practice;
use crate::state::AppState;
use crate::validation::{self, JudgeResult};

#[derive(Deserialize, Default)]
pub struct PracticeRequest {
  /// Wire ids; numbers are accepted for dictionary words
  #[serde(default)]
  pub word_ids: Option<Vec<serde_json::Value>>,
}

impl PracticeRequest {
  fn requested_ids(&self) -> Option<HashSet<String>> {
    self.word_ids.as_ref().map(|ids| {
      ids
        .iter()
        .filter_map(|id| match id {
          serde_json::Value::String(s) => Some(s.clone()),
          serde_json::Value::Number(n) => Some(n.to_string()),
          _ => None,
        })
        .collect()
    })
  }
}

#[derive(Deserialize)]
pub struct CheckRequest {
  /// Missing ids resolve to no word
  #[serde(default, deserialize_with = "deserialize_opt_loose_id")]
  pub word_id: Option<String>,
  #[serde(default)]
  pub answer: String,
}

/// POST /api/practice
pub async fn practice(
  State(state): State<AppState>,
  auth: OptionalAuth,
  JsonOrDefault(req): JsonOrDefault<PracticeRequest>,
) -> AppResult<Json<Vec<Word>>> {
  let words = state.words.get_all(auth.account_id())?;
  let requested = req.requested_ids();
  let selected = select_practice(
    &words,
    requested.as_ref(),
    state.settings.practice_size,
    &mut rand::rng(),
  );
  Ok(Json(selected))
}

/// POST /api/check
pub async fn check_answer(
  State(state): State<AppState>,
  auth: OptionalAuth,
  JsonBody(req): JsonBody<CheckRequest>,
) -> AppResult<Json<JudgeResult>> {
  let Some(word_id) = req.word_id else {
    return Err(AppError::not_found("Word not found"));
  };
  let caller = auth.account_id();
  let words = state.words.get_all(caller)?;
  let result = validation::check_answer(&words, &word_id, &req.answer, caller, &state.accounts)?;
  Ok(Json(result))
}
