use gatehouse_core::{
    AuthTokens, DisplayName, Email, HasherError, Password, PasswordHasher, TokenCodec, TokenError,
    User, UserName, UserStore, UserStoreError,
};

use super::issue_tokens;

/// Error types for register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Hasher error: {0}")]
    HasherError(#[from] HasherError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl From<UserStoreError> for RegisterError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => RegisterError::UserAlreadyExists,
            e => RegisterError::UserStoreError(e),
        }
    }
}

/// Validated registration input.
#[derive(Debug)]
pub struct NewUser {
    pub name: DisplayName,
    pub user_name: Option<UserName>,
    pub email: Email,
    pub password: Password,
}

/// Register use case - creates the account and signs the user in
pub struct RegisterUseCase<'a> {
    user_store: &'a dyn UserStore,
    hasher: &'a dyn PasswordHasher,
    token_codec: &'a dyn TokenCodec,
}

impl<'a> RegisterUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        hasher: &'a dyn PasswordHasher,
        token_codec: &'a dyn TokenCodec,
    ) -> Self {
        Self {
            user_store,
            hasher,
            token_codec,
        }
    }

    /// Execute the register use case
    ///
    /// # Returns
    /// The stored user and a fresh token pair, or `UserAlreadyExists` if the
    /// email (or user name) is taken
    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<(User, AuthTokens), RegisterError> {
        match self.user_store.get_user(&new_user.email).await {
            Ok(_) => return Err(RegisterError::UserAlreadyExists),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hasher.hash(&new_user.password).await?;
        let user = User::new(
            new_user.name,
            new_user.user_name,
            new_user.email,
            password_hash,
        );

        // The store enforces uniqueness too, so a concurrent registration
        // that slipped past the check above still ends as a conflict.
        self.user_store.add_user(user.clone()).await?;

        let tokens = issue_tokens(self.token_codec, user.email())?;
        tracing::info!(user_id = %user.id(), "user registered");

        Ok((user, tokens))
    }
}
