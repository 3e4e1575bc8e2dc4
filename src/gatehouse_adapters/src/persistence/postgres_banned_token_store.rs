use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatehouse_core::{BannedTokenStore, BannedTokenStoreError, Clock, SystemClock};
use sqlx::PgPool;

pub struct PostgresBannedTokenStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresBannedTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn database_error(e: sqlx::Error) -> BannedTokenStoreError {
    BannedTokenStoreError::DatabaseError(e.to_string())
}

#[async_trait::async_trait]
impl BannedTokenStore for PostgresBannedTokenStore {
    #[tracing::instrument(name = "Banning token in PostgreSQL", skip_all)]
    async fn ban_token(
        &self,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BannedTokenStoreError> {
        // A live row wins the conflict; a lapsed one is taken over.
        let result = sqlx::query(
            r#"
                INSERT INTO banned_tokens (token, expires_at)
                VALUES ($1, $2)
                ON CONFLICT (token) DO UPDATE
                    SET expires_at = EXCLUDED.expires_at
                    WHERE banned_tokens.expires_at <= $3
            "#,
        )
        .bind(token)
        .bind(expires_at)
        .bind(self.clock.now())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[tracing::instrument(name = "Checking banned token in PostgreSQL", skip_all)]
    async fn is_banned(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM banned_tokens
                    WHERE token = $1 AND expires_at > $2
                )
            "#,
        )
        .bind(token)
        .bind(self.clock.now())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    #[tracing::instrument(name = "Pruning banned tokens in PostgreSQL", skip_all)]
    async fn prune_expired(&self) -> Result<u64, BannedTokenStoreError> {
        let result = sqlx::query("DELETE FROM banned_tokens WHERE expires_at <= $1")
            .bind(self.clock.now())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected())
    }
}
