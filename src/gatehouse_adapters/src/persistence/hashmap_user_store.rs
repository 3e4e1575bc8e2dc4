use std::{collections::HashMap, sync::Arc};

use gatehouse_core::{Email, PasswordHash, User, UserStore, UserStoreError};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;

        let user_name_taken = user.user_name().is_some_and(|user_name| {
            users
                .values()
                .any(|existing| existing.user_name() == Some(user_name))
        });
        if users.contains_key(user.email()) || user_name_taken {
            return Err(UserStoreError::UserAlreadyExists);
        }

        users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.is_identified_by(identifier))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update_password(
        &self,
        email: &Email,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.remove(email).ok_or(UserStoreError::UserNotFound)?;

        users.insert(email.clone(), user.with_password_hash(password_hash));
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn remove_all(&self) -> Result<(), UserStoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}
