use gatehouse_core::{
    AuthTokens, HasherError, Password, PasswordHasher, TokenCodec, TokenError, User, UserStoreError,
};

use super::issue_tokens;
use crate::identity::{IdentityLookup, LookupError};

/// Error types specific to login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Hasher error: {0}")]
    HasherError(#[from] HasherError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl From<LookupError> for LoginError {
    fn from(error: LookupError) -> Self {
        match error {
            LookupError::UnknownUser => LoginError::UserNotFound,
            LookupError::InvalidCredentials => LoginError::InvalidCredentials,
            LookupError::UserStoreError(e) => LoginError::UserStoreError(e),
        }
    }
}

/// Login use case - verifies credentials and issues tokens
pub struct LoginUseCase<'a> {
    identity: IdentityLookup<'a>,
    hasher: &'a dyn PasswordHasher,
    token_codec: &'a dyn TokenCodec,
}

impl<'a> LoginUseCase<'a> {
    pub fn new(
        identity: IdentityLookup<'a>,
        hasher: &'a dyn PasswordHasher,
        token_codec: &'a dyn TokenCodec,
    ) -> Self {
        Self {
            identity,
            hasher,
            token_codec,
        }
    }

    /// Execute the login use case
    ///
    /// # Arguments
    /// * `identifier` - User name or email address
    /// * `password` - Password candidate
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        identifier: &str,
        password: Password,
    ) -> Result<(User, AuthTokens), LoginError> {
        let user = self.identity.by_identifier(identifier).await?;

        if !self.hasher.verify(&password, user.password_hash()).await? {
            tracing::info!("login rejected: password mismatch");
            return Err(LoginError::InvalidCredentials);
        }

        let tokens = issue_tokens(self.token_codec, user.email())?;
        Ok((user, tokens))
    }
}
