use gatehouse_core::{Email, User, UserStore, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("User not found")]
    UnknownUser,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Single entry point for "who is this?" lookups made on behalf of
/// unauthenticated callers (login, forgot-password).
///
/// Whether an unknown account is reported as such or disguised as a bad
/// credential is decided here and nowhere else.
pub struct IdentityLookup<'a> {
    user_store: &'a dyn UserStore,
    conceal_unknown_users: bool,
}

impl<'a> IdentityLookup<'a> {
    pub fn new(user_store: &'a dyn UserStore, conceal_unknown_users: bool) -> Self {
        Self {
            user_store,
            conceal_unknown_users,
        }
    }

    pub async fn by_identifier(&self, identifier: &str) -> Result<User, LookupError> {
        let result = self.user_store.find_by_identifier(identifier).await;
        self.conceal(result)
    }

    pub async fn by_email(&self, email: &Email) -> Result<User, LookupError> {
        let result = self.user_store.get_user(email).await;
        self.conceal(result)
    }

    fn conceal(&self, result: Result<User, UserStoreError>) -> Result<User, LookupError> {
        match result {
            Ok(user) => Ok(user),
            Err(UserStoreError::UserNotFound) if self.conceal_unknown_users => {
                Err(LookupError::InvalidCredentials)
            }
            Err(UserStoreError::UserNotFound) => Err(LookupError::UnknownUser),
            Err(e) => Err(LookupError::UserStoreError(e)),
        }
    }
}
