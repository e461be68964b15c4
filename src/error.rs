/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / error body)
 * - AuthError / ValidationError / SessionError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::services::auth::{AuthError, session::SessionError};
use crate::services::validation::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Bearer verification failure: 401 with `{"error": <message>}`.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Session cookie failure: 401 with a plain `Unauthorized` body.
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Auth(e) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response(),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            AppError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "Validation failed",
                    "location": e.location.as_str(),
                    "field": e.field,
                    "reason": e.reason,
                })),
            )
                .into_response(),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal server error".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        tracing::error!(error = %e, "session signing failed");
        AppError::Internal
    }
}
