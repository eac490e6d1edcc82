//! Registration and login routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use tiffin_core::{UserId, UserRole};

use crate::error::Result;
use crate::services::AuthService;
use crate::state::AppState;

/// Request to register a new account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Response from a successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: UserId,
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
    pub token: String,
}

/// Register a new user.
///
/// POST /register
///
/// Creates the credential and its profile together; the new account
/// always starts with the `user` role.
///
/// # Errors
///
/// Returns 400 for a bad email or weak password, 409 when the email is
/// already registered.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let account = auth
        .register(&req.email, &req.password, &req.first_name, &req.last_name)
        .await?;

    tracing::info!(user_id = %account.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registered successfully".to_owned(),
            id: account.id,
        }),
    ))
}

/// Log in with email and password.
///
/// POST /login
///
/// Returns the account's identity and a bearer token valid for 24 hours.
///
/// # Errors
///
/// Returns 401 for a wrong email/password pair; the two cases are not
/// distinguished.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (account, token) = auth.login_with_password(&req.email, &req.password).await?;

    tracing::info!(user_id = %account.id, "user logged in");

    Ok(Json(LoginResponse {
        user_id: account.id,
        email: account.email.to_string(),
        role: account.role,
        token,
    }))
}
