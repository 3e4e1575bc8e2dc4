use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::PasswordHash,
    reset_token::ResetToken,
    user::User,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `UserAlreadyExists` if the email or user name is taken.
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError>;
    /// Looks a user up by user name or email.
    async fn find_by_identifier(&self, identifier: &str) -> Result<User, UserStoreError>;
    async fn update_password(
        &self,
        email: &Email,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;
    /// Administrative bulk removal.
    async fn remove_all(&self) -> Result<(), UserStoreError>;
}

// BannedTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum BannedTokenStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Revocation list for bearer tokens that were logged out before expiry.
#[async_trait]
pub trait BannedTokenStore: Send + Sync {
    /// Idempotent: banning the same token twice keeps a single entry.
    ///
    /// Returns `true` only for the call that recorded the ban, `false` when
    /// the token was already banned and unexpired. Refresh rotation relies on
    /// this being a single atomic claim.
    async fn ban_token(
        &self,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BannedTokenStoreError>;
    /// True only while the recorded expiry is still in the future.
    async fn is_banned(&self, token: &str) -> Result<bool, BannedTokenStoreError>;
    /// Drops entries whose expiry has passed, returning how many were removed.
    async fn prune_expired(&self) -> Result<u64, BannedTokenStoreError>;
}

// ResetTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum ResetTokenStoreError {
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait ResetTokenStore: Send + Sync {
    /// Upserts by email, replacing any earlier token for the same user.
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError>;
    /// Fails with `InvalidToken` for unknown, consumed or expired tokens.
    async fn find_email_by_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError>;
    async fn invalidate_token(&self, token: &ResetToken) -> Result<(), ResetTokenStoreError>;
    /// Atomically removes an unexpired token and returns its email. Of any
    /// number of concurrent callers with the same token, at most one succeeds.
    async fn consume_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError>;
}
