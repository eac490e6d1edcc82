//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every domain error to one
//! HTTP status and one JSON envelope. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::services::orders::OrderError;

/// JSON envelope carried by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Database(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_)
                | AuthError::InvalidRole(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
                AuthError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Cart(CartError::NotFound) => StatusCode::NOT_FOUND,
            Self::Cart(CartError::Repository(RepositoryError::Conflict(_))) => {
                StatusCode::CONFLICT
            }
            Self::Cart(CartError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Order(OrderError::NotFound) => StatusCode::NOT_FOUND,
            Self::Order(OrderError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            Self::Order(OrderError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Internal details go to the log, never to the client.
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let message = match &self {
            Self::Database(RepositoryError::NotFound) => "Not found".to_owned(),
            Self::Database(RepositoryError::Conflict(msg)) => msg.clone(),
            Self::Database(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_owned()
                }
                AuthError::WeakPassword(msg) => msg.clone(),
                AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                AuthError::InvalidRole(role) => format!("Invalid role: {role}"),
                AuthError::Repository(RepositoryError::NotFound) => "User not found".to_owned(),
                AuthError::Repository(RepositoryError::Conflict(msg)) => msg.clone(),
                _ => "Internal server error".to_owned(),
            },
            Self::Cart(CartError::NotFound) => "Cart not found".to_owned(),
            Self::Cart(CartError::Repository(RepositoryError::Conflict(msg))) => msg.clone(),
            Self::Cart(CartError::Repository(_)) => "Internal server error".to_owned(),
            Self::Order(OrderError::NotFound) => "Order not found".to_owned(),
            Self::Order(err @ OrderError::InvalidTransition { .. }) => err.to_string(),
            Self::Order(OrderError::Repository(_)) => "Internal server error".to_owned(),
            Self::NotFound(msg) | Self::BadRequest(msg) => msg.clone(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
