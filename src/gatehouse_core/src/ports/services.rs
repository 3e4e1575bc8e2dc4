use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordHash},
    token::{IssuedToken, TokenClaims, TokenKind},
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Slow salted one-way hash for stored credentials.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError>;
    /// `Ok(false)` on mismatch; `Err` only when the hash cannot be checked.
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError>;
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    Expired,
    #[error("Expected a {expected} token")]
    WrongKind { expected: TokenKind },
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Issues and verifies signed bearer tokens. Revocation is not checked here.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, subject: &Email, kind: TokenKind) -> Result<IssuedToken, TokenError>;
    /// Verifies signature, algorithm and expiry. With `Some(kind)` a token
    /// of the other kind is rejected.
    fn verify(&self, token: &str, kind: Option<TokenKind>) -> Result<TokenClaims, TokenError>;
}
