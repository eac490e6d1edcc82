//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring a bearer token (and optionally the
//! admin role) in route handlers. Both verify the token against the
//! signing secret held in [`AppState`]; neither touches the database.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;
use crate::models::user::CurrentUser;
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub CurrentUser);

/// Rejection for a missing, malformed, expired or forged token.
///
/// One response for every failure mode; callers can't probe which check
/// tripped.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                error: "Invalid or missing auth token".to_owned(),
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let token = bearer_token(parts).ok_or(AuthRejection)?;
        let claims = state.tokens().verify(token).map_err(|_| AuthRejection)?;

        // The subject was a validated email at issue time.
        let email = claims.sub.parse().map_err(|_| AuthRejection)?;

        Ok(Self(CurrentUser {
            email,
            role: claims.role,
        }))
    }
}

/// Extractor that requires a valid bearer token carrying the admin role.
pub struct RequireAdmin(pub CurrentUser);

/// Rejection for the admin gate.
pub enum AdminRejection {
    /// Token missing or invalid. Same response as [`AuthRejection`].
    Unauthorized,
    /// Valid token, non-admin role.
    Forbidden,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => AuthRejection.into_response(),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(ErrorBody {
                    error: "Access denied: Admins only".to_owned(),
                }),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state)
            .await
            .map_err(|_| AdminRejection::Unauthorized)?;

        if !user.role.is_admin() {
            return Err(AdminRejection::Forbidden);
        }

        Ok(Self(user))
    }
}
