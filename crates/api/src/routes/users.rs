//! User profile routes.
//!
//! Profiles are the freely CRUD-able user documents; credentials live in
//! the auth routes. Reads are public, writes need a token. Deleting a
//! profile never touches the credential behind it.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use tiffin_core::{CartId, Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::user::Profile;
use crate::state::AppState;

fn parse_user_id(id: &str) -> Result<UserId> {
    UserId::parse(id).map_err(|_| AppError::NotFound("User not found".to_owned()))
}

/// Listing of all profiles.
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub total: usize,
    pub users: Vec<Profile>,
}

/// Request to create a profile directly (no credential).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cart_id: Option<CartId>,
    #[serde(rename = "type")]
    pub profile_type: Option<String>,
    pub age: Option<i32>,
    pub is_active: Option<bool>,
}

/// Response carrying a created entity's ID.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: UserId,
}

/// Request to patch a profile. Absent fields keep their stored values.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub is_active: Option<bool>,
}

/// List all user profiles.
///
/// GET /users
///
/// # Errors
///
/// Returns 500 if the database is unreachable.
pub async fn index(State(state): State<AppState>) -> Result<Json<UserListResponse>> {
    let users = UserRepository::new(state.pool()).list_profiles().await?;

    Ok(Json(UserListResponse {
        total: users.len(),
        users,
    }))
}

/// Get a single profile.
///
/// GET /users/{id}
///
/// # Errors
///
/// Returns 404 for an unknown or malformed ID.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Profile>> {
    let id = parse_user_id(&id)?;

    let profile = UserRepository::new(state.pool())
        .get_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

    Ok(Json(profile))
}

/// Create a profile without a credential.
///
/// POST /users
///
/// # Errors
///
/// Returns 400 for a missing name or bad email.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("'name' is required".to_owned()));
    }

    let email = Email::parse(&req.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let profile = Profile {
        id: UserId::generate(),
        first_name: req.first_name,
        last_name: req.last_name,
        email,
        cart_id: req.cart_id.unwrap_or_else(CartId::generate),
        profile_type: req.profile_type.unwrap_or_else(|| "user".to_owned()),
        age: req.age,
        is_active: req.is_active.unwrap_or(true),
    };

    UserRepository::new(state.pool())
        .create_profile(&profile)
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: profile.id })))
}

/// Patch a profile.
///
/// PATCH /users/{id}
///
/// # Errors
///
/// Returns 400 for a bad email, 404 for an unknown ID.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<StatusCode> {
    let id = parse_user_id(&id)?;

    let email = req
        .email
        .as_deref()
        .map(Email::parse)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    UserRepository::new(state.pool())
        .update_profile(
            id,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
            email.as_ref(),
            req.age,
            req.is_active,
        )
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("User not found".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(StatusCode::OK)
}

/// Delete a profile.
///
/// DELETE /users/{id}
///
/// # Errors
///
/// Returns 404 for an unknown ID.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_user_id(&id)?;

    let deleted = UserRepository::new(state.pool()).delete_profile(id).await?;
    if !deleted {
        return Err(AppError::NotFound("User not found".to_owned()));
    }

    Ok(StatusCode::NO_CONTENT)
}
