//! User domain types.
//!
//! Two separate entities share the name "user" in this app: the credential
//! record (`UserAccount`, never deleted, carries the role) and the profile
//! document (`Profile`, freely CRUD-able through the `/users` routes).
//! Registration creates both with the same ID.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tiffin_core::{CartId, Email, UserId, UserRole};

/// A credential record (domain type).
///
/// The password hash lives only in the database and the repository layer;
/// it never crosses into this type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAccount {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Access-control role.
    pub role: UserRole,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user profile document.
///
/// Created alongside the credential at registration (sharing its ID, with a
/// freshly generated cart ID) or standalone through `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub cart_id: CartId,
    /// Historical field, always `"user"` for registered profiles.
    #[serde(rename = "type")]
    pub profile_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub is_active: bool,
}

/// The authenticated caller, decoded from a verified bearer token.
///
/// Built once per request by the auth extractors; handlers never touch raw
/// claims.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Email the token was issued to.
    pub email: Email,
    /// Role carried in the token.
    pub role: UserRole,
}
