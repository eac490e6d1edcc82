//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin account
//! tiffin-cli admin create -e admin@example.com -p changeme --first-name Mess --last-name Admin
//! ```
//!
//! # Environment Variables
//!
//! - `TIFFIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use tiffin_core::{CartId, Email, UserId, UserRole};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] tiffin_core::EmailError),

    /// Password too short.
    #[error("Password must be at least 6 characters")]
    WeakPassword,

    /// User already exists.
    #[error("A user already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

/// Create a new admin account.
///
/// Writes a password credential and a profile document sharing one ID, the
/// same shape registration produces, but with the `admin` role.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `password` - Plaintext password; hashed with Argon2id before storage
/// * `first_name` - First name for the profile
/// * `last_name` - Last name for the profile
///
/// # Returns
///
/// The ID of the created account.
///
/// # Errors
///
/// Returns `AdminError` if validation fails, the email is already taken, or
/// the database rejects the writes.
pub async fn create_admin(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<UserId, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;

    if password.len() < 6 {
        return Err(AdminError::WeakPassword);
    }

    let database_url = std::env::var("TIFFIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("TIFFIN_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating admin account: {email}");

    // Check if a credential already exists for this email
    let existing = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(AdminError::UserExists(email.to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AdminError::PasswordHash(e.to_string()))?
        .to_string();

    // Credential and profile land together or not at all
    let mut tx = pool.begin().await?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        r"
        INSERT INTO users (email, password_hash, role)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(&email)
    .bind(&password_hash)
    .bind(UserRole::Admin)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r"
        INSERT INTO profiles (id, first_name, last_name, email, cart_id, profile_type)
        VALUES ($1, $2, $3, $4, $5, 'admin')
        ",
    )
    .bind(user_id)
    .bind(first_name)
    .bind(last_name)
    .bind(&email)
    .bind(CartId::generate())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Admin account created successfully! ID: {user_id}, Email: {email}");

    Ok(user_id)
}
