use gatehouse_core::{Email, UserProfile, UserStore, UserStoreError};

/// Error types for get profile use case
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Get profile use case - returns the public fields of an account
pub struct GetProfileUseCase<'a> {
    user_store: &'a dyn UserStore,
}

impl<'a> GetProfileUseCase<'a> {
    pub fn new(user_store: &'a dyn UserStore) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email) -> Result<UserProfile, ProfileError> {
        let user = self.user_store.get_user(email).await?;
        Ok(user.profile())
    }
}
