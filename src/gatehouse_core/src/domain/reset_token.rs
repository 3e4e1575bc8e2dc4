use chrono::{DateTime, Utc};
use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

use super::{email::Email, user::UserError};

const RESET_TOKEN_BYTES: usize = 32;

/// Single-use password reset credential: 32 random bytes, hex encoded.
#[derive(Debug, Clone)]
pub struct ResetToken(Secret<String>);

impl ResetToken {
    pub fn generate() -> Self {
        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(Secret::from(hex::encode(bytes)))
    }

    /// Accepts any non-empty token presented by a client. Unknown tokens are
    /// rejected later by the store, the same way expired ones are.
    pub fn parse(value: Secret<String>) -> Result<Self, UserError> {
        let trimmed = value.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(UserError::MissingResetToken);
        }
        Ok(Self(Secret::from(trimmed.to_owned())))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for ResetToken {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ResetToken {}

/// An outstanding reset request. At most one exists per email.
#[derive(Debug, Clone)]
pub struct PasswordResetRequest {
    pub email: Email,
    pub token: ResetToken,
    pub expires_at: DateTime<Utc>,
}

impl PasswordResetRequest {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
