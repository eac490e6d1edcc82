//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::token::TokenError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed structural validation.
    #[error("email rejected: {0}")]
    InvalidEmail(#[from] tiffin_core::EmailError),

    /// Wrong password or unknown email; callers cannot tell which.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email already has a stored credential.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// Password failed the strength check.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// Role string not recognised.
    #[error("invalid role: {0}")]
    InvalidRole(String),

    /// A stored password hash failed to parse.
    #[error("stored password hash is malformed")]
    MalformedHash,

    /// Token issuing error.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Database failure underneath an auth operation.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Argon2 could not hash the password.
    #[error("password hashing failed")]
    PasswordHash,
}
