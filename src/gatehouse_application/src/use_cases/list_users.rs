use gatehouse_core::{UserProfile, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum ListUsersError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct ListUsersUseCase<'a> {
    user_store: &'a dyn UserStore,
}

impl<'a> ListUsersUseCase<'a> {
    pub fn new(user_store: &'a dyn UserStore) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<UserProfile>, ListUsersError> {
        let users = self.user_store.list_users().await?;
        Ok(users.iter().map(|user| user.profile()).collect())
    }
}
