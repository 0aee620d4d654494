//! Custom error types for the storefront service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Custom error type for the storefront service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authorization header missing or not a bearer token
    #[error("Missing or malformed bearer token")]
    Unauthenticated,

    /// Token signature, expiry or shape is invalid
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Token is valid but its user no longer exists
    #[error("Token user no longer exists")]
    UserGone,

    #[error("User already exists")]
    DuplicateEmail,

    /// No user matches the login email
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidCredentials,

    /// Too many failed logins for this email
    #[error("Too many failed login attempts")]
    TooManyAttempts,

    #[error("Item not in cart")]
    ItemNotFound,

    #[error("Already in wishlist")]
    AlreadyExists,

    /// Request body or parameters failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0:#}")]
    Internal(#[from] anyhow::Error),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::InvalidToken | ApiError::UserGone => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::DuplicateEmail
            | ApiError::UserNotFound
            | ApiError::InvalidCredentials
            | ApiError::AlreadyExists
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ItemNotFound => StatusCode::NOT_FOUND,
            ApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) | ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self {
            // One body for every auth failure; the variant only shows in logs.
            ApiError::Unauthenticated | ApiError::InvalidToken | ApiError::UserGone => {
                warn!("Rejected request: {}", self);
                "Authentication required".to_string()
            }
            ApiError::Internal(_) | ApiError::Store(_) => {
                error!("Request failed: {}", self);
                "Server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
