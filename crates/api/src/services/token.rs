//! Bearer token issuing and verification.
//!
//! Tokens are HMAC-signed (HS256) with the secret from
//! `TIFFIN_JWT_SECRET` and carry the subject email, the role captured
//! at issue time, and issue/expiry timestamps. Lifetime is a fixed 24
//! hours; there is no refresh flow and no revocation list, so a role
//! change only takes effect once the old token expires.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tiffin_core::{Email, UserRole};

/// Fixed token lifetime.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Errors that can occur when issuing or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token's expiry is in the past.
    #[error("token expired")]
    Expired,

    /// The signature doesn't match the configured secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token isn't structurally one of ours.
    #[error("malformed token")]
    Malformed,

    /// Signing failed.
    #[error("token signing failed")]
    Signing,
}

/// Claims carried in an issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's email).
    pub sub: String,

    /// Role captured at issue time.
    pub role: UserRole,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issues and verifies bearer tokens.
///
/// The signing keys are derived from the secret once at startup and
/// shared through [`AppState`](crate::state::AppState).
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Build a token service from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();

        // Default validation allows 60s of clock leeway, which would let
        // an expired token pass. Expiry is exact here.
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation,
        }
    }

    /// Issue a token for an authenticated user.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, email: &Email, role: UserRole) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::hours(TOKEN_TTL_HOURS);

        let claims = Claims {
            sub: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Signing)
    }

    /// Verify a presented token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for an outdated token,
    /// `TokenError::InvalidSignature` for a bad signature and
    /// `TokenError::Malformed` for anything that doesn't parse.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
