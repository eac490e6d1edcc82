//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string failed to parse as an [`Email`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum EmailError {
    /// Empty input.
    #[error("email must not be empty")]
    Empty,
    /// Input over the length cap.
    #[error("email is longer than the {max} character limit")]
    TooLong {
        /// The enforced ceiling.
        max: usize,
    },
    /// No @ anywhere in the input.
    #[error("email is missing the @ symbol")]
    MissingAtSymbol,
    /// Nothing before the @.
    #[error("email has an empty local part")]
    EmptyLocalPart,
    /// Nothing after the @.
    #[error("email has an empty domain")]
    EmptyDomain,
    /// The domain has no dot, so it cannot name a mail host.
    #[error("email domain must contain a dot")]
    MissingDomainDot,
}

/// A structurally valid email address.
///
/// Validation is shape-only: one local part, an @, and a dotted domain.
/// Nothing here checks that the mailbox exists.
///
/// ## Constraints
///
/// - Length: 1-254 characters (RFC 5321 limit)
/// - Must contain an @ symbol
/// - Local part (before @) must not be empty
/// - Domain part (after @) must not be empty and must contain a dot
///
/// ## Examples
///
/// ```
/// use tiffin_core::Email;
///
/// // Valid emails
/// assert!(Email::parse("bob@mess.com").is_ok());
/// assert!(Email::parse("user.name+tag@domain.co.uk").is_ok());
///
/// // Invalid emails
/// assert!(Email::parse("").is_err());               // empty
/// assert!(Email::parse("no-at-symbol").is_err());   // missing @
/// assert!(Email::parse("@domain.com").is_err());    // empty local part
/// assert!(Email::parse("user@").is_err());          // empty domain
/// assert!(Email::parse("user@localhost").is_err()); // dotless domain
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321's 254-character ceiling.
    pub const MAX_LENGTH: usize = 254;

    /// Validate a string and wrap it as an `Email`.
    ///
    /// # Errors
    ///
    /// Returns the [`EmailError`] naming the first structural check that
    /// failed: empty input, over-length input, a missing @, an empty part
    /// on either side of the @, or a dotless domain.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::MissingAtSymbol)?;

        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }

        if domain.is_empty() {
            return Err(EmailError::EmptyDomain);
        }

        // user@localhost never reaches a real mailbox.
        match domain.rsplit_once('.') {
            Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(Self(s.to_owned())),
            _ => Err(EmailError::MissingDomainDot),
        }
    }

    /// Borrow the address as a plain `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Email {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        // Stored as plain TEXT
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Email {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        // Rows were validated on the way in; trust them on the way out.
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Email {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
