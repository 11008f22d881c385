//! Error kinds surfaced by core operations and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    /// No caller, or the caller does not resolve to an account
    #[error("{0}")]
    Unauthorized(String),

    /// Missing/empty required field, bad payload, unknown counter name
    #[error("{0}")]
    Validation(String),

    /// Referenced word or account does not resolve for this caller
    #[error("{0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    Persistence(#[from] StoreError),

    /// Failures outside storage that the caller cannot fix (e.g. password hashing)
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Not authorized".to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Persistence(e) => {
                tracing::error!("Persistence failure: {}", e);
                "Storage error".to_string()
            }
            Self::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
