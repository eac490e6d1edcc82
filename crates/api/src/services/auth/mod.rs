//! Registration, password login and role management.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tiffin_core::{CartId, Email, UserId, UserRole};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::UserAccount;
use crate::services::token::TokenService;

/// Shortest password the register operation accepts.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration, login and role changes.
///
/// Login hands back a signed bearer token alongside the account.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Bind the service to a pool and a token issuer.
    #[must_use]
    pub const fn new(pool: &'a PgPool, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(pool),
            tokens,
        }
    }

    /// Create a credential and matching profile for a new account.
    ///
    /// Every new account gets the `user` role and a fresh cart ID on its
    /// profile. Credential and profile are created together; a failure on
    /// either leaves no trace of the other.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` when
    /// validation fails, `AuthError::UserAlreadyExists` when the email is
    /// taken.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<UserAccount, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        // Create credential and profile together
        let cart_id = CartId::generate();
        let account = self
            .users
            .create_with_password(
                &email,
                &password_hash,
                UserRole::User,
                first_name,
                last_name,
                &cart_id,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(account)
    }

    /// Check a password and mint a bearer token.
    ///
    /// A missing user and a wrong password both surface as
    /// `InvalidCredentials`; callers cannot enumerate accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for a wrong pair,
    /// `AuthError::MalformedHash` when the stored hash can't be parsed.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(UserAccount, String), AuthError> {
        let email = Email::parse(email)?;

        // One lookup carries back both the identity and its hash
        let (account, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.tokens.issue(&account.email, account.role)?;

        Ok((account, token))
    }

    /// Change a user's role.
    ///
    /// Outstanding tokens keep the role they were issued with until they
    /// expire.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidRole` if the role string is unknown.
    /// Returns `AuthError::Repository` with `NotFound` if the user doesn't
    /// exist.
    pub async fn update_role(&self, id: UserId, role: &str) -> Result<(), AuthError> {
        let role: UserRole = role
            .parse()
            .map_err(|_| AuthError::InvalidRole(role.to_owned()))?;

        self.users.update_role(id, role).await?;

        Ok(())
    }
}

/// Length is the only strength rule, matching the register contract.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Argon2id hash with a fresh random salt, as a PHC string.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A hash that fails to parse is a data problem, not a caller problem,
/// and is kept distinct from a plain mismatch.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::MalformedHash)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
