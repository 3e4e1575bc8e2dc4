use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatehouse_core::{
    Clock, Email, ResetToken, ResetTokenStore, ResetTokenStoreError, SystemClock,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;

pub struct PostgresResetTokenStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresResetTokenStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: PgPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn unexpected(e: sqlx::Error) -> ResetTokenStoreError {
    ResetTokenStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl ResetTokenStore for PostgresResetTokenStore {
    #[tracing::instrument(name = "Storing reset token in PostgreSQL", skip_all)]
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError> {
        sqlx::query(
            r#"
                INSERT INTO password_resets (email, token, expires_at)
                VALUES ($1, $2, $3)
                ON CONFLICT (email)
                DO UPDATE SET token = EXCLUDED.token,
                              expires_at = EXCLUDED.expires_at,
                              created_at = now()
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(token.as_str())
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Looking up reset token in PostgreSQL", skip_all)]
    async fn find_email_by_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let email = sqlx::query_scalar::<_, String>(
            r#"
                SELECT email FROM password_resets
                WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token.as_str())
        .bind(self.clock.now())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ResetTokenStoreError::InvalidToken)?;

        Email::try_from(Secret::from(email))
            .map_err(|e| ResetTokenStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Invalidating reset token in PostgreSQL", skip_all)]
    async fn invalidate_token(&self, token: &ResetToken) -> Result<(), ResetTokenStoreError> {
        sqlx::query("DELETE FROM password_resets WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        Ok(())
    }

    #[tracing::instrument(name = "Consuming reset token in PostgreSQL", skip_all)]
    async fn consume_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        // The row lock taken by DELETE lets only one caller see RETURNING.
        let email = sqlx::query_scalar::<_, String>(
            r#"
                DELETE FROM password_resets
                WHERE token = $1 AND expires_at > $2
                RETURNING email
            "#,
        )
        .bind(token.as_str())
        .bind(self.clock.now())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?
        .ok_or(ResetTokenStoreError::InvalidToken)?;

        Email::try_from(Secret::from(email))
            .map_err(|e| ResetTokenStoreError::UnexpectedError(e.to_string()))
    }
}
