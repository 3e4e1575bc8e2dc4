use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatehouse_core::{BannedTokenStore, BannedTokenStoreError, Clock, SystemClock};
use redis::{AsyncCommands, aio::MultiplexedConnection};

/// Each revoked token is a key that Redis expires on its own when the
/// token would have lapsed anyway.
#[derive(Clone)]
pub struct RedisBannedTokenStore {
    conn: MultiplexedConnection,
    clock: Arc<dyn Clock>,
}

impl RedisBannedTokenStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self::with_clock(conn, Arc::new(SystemClock))
    }

    pub fn with_clock(conn: MultiplexedConnection, clock: Arc<dyn Clock>) -> Self {
        Self { conn, clock }
    }
}

#[async_trait::async_trait]
impl BannedTokenStore for RedisBannedTokenStore {
    #[tracing::instrument(name = "Banning token in Redis", skip_all)]
    async fn ban_token(
        &self,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BannedTokenStoreError> {
        let Some(ttl) = remaining_ttl_in_seconds(self.clock.now(), expires_at) else {
            return Ok(false);
        };

        // SET NX answers nil when the key already exists.
        let mut conn = self.conn.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(get_key(&token))
            .arg(true)
            .arg("NX")
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))?;

        Ok(reply.is_some())
    }

    #[tracing::instrument(name = "Checking banned token in Redis", skip_all)]
    async fn is_banned(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let mut conn = self.conn.clone();
        conn.exists(get_key(token))
            .await
            .map_err(|e| BannedTokenStoreError::DatabaseError(e.to_string()))
    }

    async fn prune_expired(&self) -> Result<u64, BannedTokenStoreError> {
        // Keys carry their own TTL.
        Ok(0)
    }
}

const BANNED_TOKEN_KEY_PREFIX: &str = "banned_token:";

fn get_key(token: &str) -> String {
    format!("{BANNED_TOKEN_KEY_PREFIX}{token}")
}

/// Whole seconds left before `expires_at`, rounded up; `None` once lapsed.
fn remaining_ttl_in_seconds(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Option<u64> {
    let remaining = (expires_at - now).num_milliseconds();
    if remaining <= 0 {
        return None;
    }
    u64::try_from(remaining).ok().map(|ms| ms.div_ceil(1000))
}
