use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::types::DeviceId;

/// Failures raised by an [`AccountStore`](crate::repositories::AccountStore).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("account not found: {0}")]
    NotFound(String),
    #[error("device {device_id} already registered for {username}")]
    DuplicateDevice { username: String, device_id: DeviceId },
}

/// Failures of the session protocol. Each maps to one fixed status and message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),
    /// Unknown user and wrong credential are deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no active session")]
    NoActiveSession,
    #[error("account not found")]
    NotFound,
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AuthError::NotFound,
            other => AuthError::Store(other),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, "UNAUTHORIZED"),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::InternalServerError(err) => {
                tracing::error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_SERVER_ERROR",
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField(_) => AppError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            AuthError::NoActiveSession => {
                AppError::Unauthorized("No active session found".into())
            }
            AuthError::NotFound => AppError::NotFound("User not found".into()),
            AuthError::Store(store) => AppError::InternalServerError(store.into()),
        }
    }
}
