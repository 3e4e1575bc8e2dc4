use std::sync::LazyLock;

use regex::Regex;
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::{email::Email, password::PasswordHash};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Name must be between 1 and 100 characters")]
    InvalidName,
    #[error("User name must be 3-32 characters of letters, digits, '.', '_' or '-'")]
    InvalidUserName,
    #[error("Reset token is required")]
    MissingResetToken,
}

const MAX_NAME_LENGTH: usize = 100;

static USER_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("user name regex is valid"));

/// Human readable name shown on the profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(value: &str) -> Result<Self, UserError> {
        let trimmed = value.trim();
        let len = trimmed.chars().count();
        if len == 0 || len > MAX_NAME_LENGTH {
            return Err(UserError::InvalidName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional unique login handle, usable in place of the email at login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn parse(value: &str) -> Result<Self, UserError> {
        if USER_NAME_REGEX.is_match(value) {
            Ok(Self(value.to_owned()))
        } else {
            Err(UserError::InvalidUserName)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A registered account. Not serializable: use [`User::profile`] for
/// anything that leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    name: DisplayName,
    user_name: Option<UserName>,
    email: Email,
    password_hash: PasswordHash,
}

impl User {
    pub fn new(
        name: DisplayName,
        user_name: Option<UserName>,
        email: Email,
        password_hash: PasswordHash,
    ) -> Self {
        Self::from_parts(Uuid::new_v4(), name, user_name, email, password_hash)
    }

    /// Rebuilds a user loaded from storage.
    pub fn from_parts(
        id: Uuid,
        name: DisplayName,
        user_name: Option<UserName>,
        email: Email,
        password_hash: PasswordHash,
    ) -> Self {
        Self {
            id,
            name,
            user_name,
            email,
            password_hash,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    pub fn user_name(&self) -> Option<&UserName> {
        self.user_name.as_ref()
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn with_password_hash(self, password_hash: PasswordHash) -> Self {
        Self {
            password_hash,
            ..self
        }
    }

    /// True if `identifier` is this user's email or user name.
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.email.as_str() == identifier
            || self
                .user_name
                .as_ref()
                .is_some_and(|user_name| user_name.as_str() == identifier)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.as_str().to_owned(),
            user_name: self.user_name.as_ref().map(|u| u.as_str().to_owned()),
            email: self.email.as_ref().expose_secret().clone(),
        }
    }
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_name: Option<String>,
    pub email: String,
}
