//! Admin-only routes.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use tiffin_core::UserId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::services::AuthService;
use crate::state::AppState;

/// Request to change a user's role.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

/// Confirmation message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Change a user's role.
///
/// PUT /admin/users/{id}/role
///
/// Outstanding tokens keep their issued role until they expire.
///
/// # Errors
///
/// Returns 400 for an unknown role, 404 for an unknown user.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<MessageResponse>> {
    // A malformed UUID can't name a user; same response as an unknown one.
    let user_id =
        UserId::parse(&id).map_err(|_| AppError::NotFound("User not found".to_owned()))?;

    let auth = AuthService::new(state.pool(), state.tokens());
    auth.update_role(user_id, &req.role).await?;

    tracing::info!(user_id = %user_id, role = %req.role, changed_by = %admin.email, "role updated");

    Ok(Json(MessageResponse {
        message: "Role updated successfully".to_owned(),
    }))
}
