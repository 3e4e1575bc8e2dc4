use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use gatehouse_core::{BannedTokenStore, BannedTokenStoreError, Clock, SystemClock};

/// Revoked tokens keyed by token string, each with the instant it lapses.
#[derive(Clone)]
pub struct DashMapBannedTokenStore {
    banned_tokens: Arc<DashMap<String, DateTime<Utc>>>,
    clock: Arc<dyn Clock>,
}

impl Default for DashMapBannedTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashMapBannedTokenStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            banned_tokens: Arc::new(DashMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.banned_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banned_tokens.is_empty()
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for DashMapBannedTokenStore {
    async fn ban_token(
        &self,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BannedTokenStoreError> {
        let now = self.clock.now();
        // The entry holds the shard lock, so check and insert are one step.
        let newly_banned = match self.banned_tokens.entry(token) {
            Entry::Occupied(entry) if now < *entry.get() => false,
            Entry::Occupied(mut entry) => {
                entry.insert(expires_at);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(expires_at);
                true
            }
        };
        Ok(newly_banned)
    }

    async fn is_banned(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let now = self.clock.now();
        Ok(self
            .banned_tokens
            .get(token)
            .is_some_and(|expires_at| now < *expires_at))
    }

    #[tracing::instrument(name = "Pruning expired banned tokens", skip_all)]
    async fn prune_expired(&self) -> Result<u64, BannedTokenStoreError> {
        let now = self.clock.now();
        let before = self.banned_tokens.len();
        self.banned_tokens.retain(|_, expires_at| now < *expires_at);
        Ok(before.saturating_sub(self.banned_tokens.len()) as u64)
    }
}
