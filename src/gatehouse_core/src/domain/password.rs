use secrecy::{ExposeSecret, Secret};

use super::user::UserError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A plaintext password supplied by the user.
///
/// `TryFrom` enforces the minimum length and is used whenever a password is
/// being set. [`Password::candidate`] only rejects empty input and is used
/// for login, where the stored hash decides.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn candidate(value: Secret<String>) -> Result<Self, UserError> {
        if value.expose_secret().is_empty() {
            return Err(UserError::MissingPassword);
        }
        Ok(Self(value))
    }

    /// Parses a new password together with its confirmation.
    pub fn with_confirmation(
        value: Secret<String>,
        confirmation: &Secret<String>,
    ) -> Result<Self, UserError> {
        let password = Self::try_from(value)?;
        if password.0.expose_secret() != confirmation.expose_secret() {
            return Err(UserError::PasswordMismatch);
        }
        Ok(password)
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = UserError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// PHC-formatted output of the credential hasher.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(phc: String) -> Self {
        Self(Secret::from(phc))
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
