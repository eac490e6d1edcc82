//! User repository for credential and profile persistence.
//!
//! Credentials (`users`) and profile documents (`profiles`) are separate
//! tables; registration writes both inside one transaction so a credential
//! can never exist without its profile.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tiffin_core::{CartId, Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::user::{Profile, UserAccount};

/// Row shape for credential lookups that include the password hash.
///
/// Kept private to this module: the hash never travels past the service
/// layer's verify call.
#[derive(sqlx::FromRow)]
struct AccountWithHashRow {
    id: UserId,
    email: Email,
    role: UserRole,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a credential and its profile document in one transaction.
    ///
    /// The profile reuses the credential's generated ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        password_hash: &str,
        role: UserRole,
        first_name: &str,
        last_name: &str,
        cart_id: &CartId,
    ) -> Result<UserAccount, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let account = sqlx::query_as::<_, UserAccount>(
            r"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, role, created_at, updated_at
            ",
        )
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        sqlx::query(
            r"
            INSERT INTO profiles (id, first_name, last_name, email, cart_id, profile_type)
            VALUES ($1, $2, $3, $4, $5, 'user')
            ",
        )
        .bind(account.id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(cart_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(account)
    }

    /// Get a user's account and password hash by email.
    ///
    /// Returns `None` if no credential exists for the email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(UserAccount, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountWithHashRow>(
            r"
            SELECT id, email, role, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let account = UserAccount {
                id: r.id,
                email: r.email,
                role: r.role,
                created_at: r.created_at,
                updated_at: r.updated_at,
            };
            (account, r.password_hash)
        }))
    }

    /// Change the role on a credential.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_role(&self, id: UserId, role: UserRole) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET role = $1, updated_at = now()
            WHERE id = $2
            ",
        )
        .bind(role)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List all profile documents.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, RepositoryError> {
        let profiles = sqlx::query_as::<_, Profile>(
            r"
            SELECT id, first_name, last_name, email, cart_id, profile_type, age, is_active
            FROM profiles
            ORDER BY created_at ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(profiles)
    }

    /// Get a profile document by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_profile(&self, id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            SELECT id, first_name, last_name, email, cart_id, profile_type, age, is_active
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Insert a standalone profile document (no credential attached).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_profile(&self, profile: &Profile) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, first_name, last_name, email, cart_id, profile_type, age, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(profile.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.cart_id)
        .bind(&profile.profile_type)
        .bind(profile.age)
        .bind(profile.is_active)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("profile already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Patch a profile document. `None` fields keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_profile(
        &self,
        id: UserId,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&Email>,
        age: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET first_name = COALESCE($2, first_name),
                last_name  = COALESCE($3, last_name),
                email      = COALESCE($4, email),
                age        = COALESCE($5, age),
                is_active  = COALESCE($6, is_active),
                updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(age)
        .bind(is_active)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a profile document. The credential (if any) is untouched.
    ///
    /// # Returns
    ///
    /// Returns `true` if the profile was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_profile(&self, id: UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
