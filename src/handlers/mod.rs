pub mod practice;
pub mod stats;
pub mod words;

use axum::{
  body::Bytes,
  extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub async fn index() -> &'static str {
  "Chinese Trainer API is running!"
}

/// JSON body that must be present and well-formed; failures are 400 `{"error": ...}`
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = read_body(req, state).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Err(AppError::validation("Request body is required"));
    }
    parse(&bytes).map(JsonBody)
  }
}

/// JSON body where an empty body means `T::default()`
pub struct JsonOrDefault<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrDefault<T>
where
  T: DeserializeOwned + Default,
  S: Send + Sync,
{
  type Rejection = AppError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = read_body(req, state).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(JsonOrDefault(T::default()));
    }
    parse(&bytes).map(JsonOrDefault)
  }
}

async fn read_body<S: Send + Sync>(req: Request, state: &S) -> Result<Bytes, AppError> {
  Bytes::from_request(req, state)
    .await
    .map_err(|e| AppError::validation(format!("Failed to read request body: {}", e)))
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
  serde_json::from_slice(bytes).map_err(|e| AppError::validation(format!("Invalid JSON: {}", e)))
}

pub use practice::{check_answer, practice};
pub use stats::{finish_game, update_stats};
pub use words::{add_word, delete_word, get_words};
