use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use gatehouse_core::{
    Clock, Email, PasswordResetRequest, ResetToken, ResetTokenStore, ResetTokenStoreError,
    SystemClock,
};
use tokio::sync::RwLock;

/// At most one pending reset per email.
#[derive(Clone)]
pub struct HashMapResetTokenStore {
    requests: Arc<RwLock<PendingResets>>,
    clock: Arc<dyn Clock>,
}

/// Requests keyed by email with a `token -> email` index beside them.
/// Both maps change under the same write lock.
#[derive(Default)]
struct PendingResets {
    by_email: HashMap<Email, PasswordResetRequest>,
    by_token: HashMap<String, Email>,
}

impl PendingResets {
    fn get(&self, token: &ResetToken) -> Option<&PasswordResetRequest> {
        self.by_token
            .get(token.as_str())
            .and_then(|email| self.by_email.get(email))
    }

    fn remove(&mut self, token: &ResetToken) -> Option<PasswordResetRequest> {
        let email = self.by_token.remove(token.as_str())?;
        self.by_email.remove(&email)
    }
}

impl Default for HashMapResetTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HashMapResetTokenStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            requests: Arc::default(),
            clock,
        }
    }
}

#[async_trait::async_trait]
impl ResetTokenStore for HashMapResetTokenStore {
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError> {
        let request = PasswordResetRequest {
            email: email.clone(),
            token: token.clone(),
            expires_at,
        };

        let mut requests = self.requests.write().await;
        if let Some(previous) = requests.by_email.insert(email.clone(), request) {
            requests.by_token.remove(previous.token.as_str());
        }
        requests
            .by_token
            .insert(token.as_str().to_owned(), email.clone());
        Ok(())
    }

    async fn find_email_by_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let now = self.clock.now();
        self.requests
            .read()
            .await
            .get(token)
            .filter(|request| request.is_valid_at(now))
            .map(|request| request.email.clone())
            .ok_or(ResetTokenStoreError::InvalidToken)
    }

    async fn invalidate_token(&self, token: &ResetToken) -> Result<(), ResetTokenStoreError> {
        self.requests.write().await.remove(token);
        Ok(())
    }

    async fn consume_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let now = self.clock.now();
        self.requests
            .write()
            .await
            .remove(token)
            .filter(|request| request.is_valid_at(now))
            .map(|request| request.email)
            .ok_or(ResetTokenStoreError::InvalidToken)
    }
}
