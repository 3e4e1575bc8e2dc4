use gatehouse_core::{
    HasherError, Password, PasswordHasher, ResetToken, ResetTokenStore, ResetTokenStoreError,
    UserStore, UserStoreError,
};

/// Error types for reset password use case
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("Reset token store error: {0}")]
    ResetTokenStoreError(ResetTokenStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Hasher error: {0}")]
    HasherError(#[from] HasherError),
}

impl From<ResetTokenStoreError> for ResetPasswordError {
    fn from(error: ResetTokenStoreError) -> Self {
        match error {
            ResetTokenStoreError::InvalidToken => ResetPasswordError::InvalidToken,
            e => ResetPasswordError::ResetTokenStoreError(e),
        }
    }
}

/// Reset password use case - consumes a reset token and sets a new password.
///
/// The token is claimed before the password is hashed, so concurrent resets
/// with one token see exactly one winner. A failure after the claim leaves the
/// token spent and the old password in place; the user asks for a new link.
pub struct ResetPasswordUseCase<'a> {
    user_store: &'a dyn UserStore,
    reset_token_store: &'a dyn ResetTokenStore,
    hasher: &'a dyn PasswordHasher,
}

impl<'a> ResetPasswordUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        reset_token_store: &'a dyn ResetTokenStore,
        hasher: &'a dyn PasswordHasher,
    ) -> Self {
        Self {
            user_store,
            reset_token_store,
            hasher,
        }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let email = self.reset_token_store.consume_token(&token).await?;

        let password_hash = self.hasher.hash(&new_password).await?;
        self.user_store
            .update_password(&email, password_hash)
            .await?;

        tracing::info!("password reset completed");
        Ok(())
    }
}
