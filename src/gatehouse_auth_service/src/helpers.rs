use std::{sync::Arc, time::Duration};

use gatehouse_adapters::{
    DashMapBannedTokenStore, MIGRATOR, PostgresBannedTokenStore, RedisBannedTokenStore,
    RevocationBackend, config::PostgresSettings,
};
use gatehouse_core::BannedTokenStore;
use redis::{Client, RedisResult};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

/// Create a PostgreSQL connection pool and run pending migrations
pub async fn configure_postgresql(
    url: &Secret<String>,
    settings: &PostgresSettings,
) -> color_eyre::Result<PgPool> {
    let pg_pool = get_postgres_pool(url.expose_secret(), settings).await?;

    MIGRATOR.run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout())
        .connect(url)
        .await
}

/// Create a Redis client
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}

/// Build the revocation store selected in configuration.
pub async fn configure_banned_token_store(
    backend: RevocationBackend,
    pg_pool: Option<&PgPool>,
    redis_hostname: &str,
) -> color_eyre::Result<Arc<dyn BannedTokenStore>> {
    let store: Arc<dyn BannedTokenStore> = match backend {
        RevocationBackend::Memory => Arc::new(DashMapBannedTokenStore::new()),
        RevocationBackend::Postgres => {
            let pg_pool = pg_pool.ok_or_else(|| {
                color_eyre::eyre::eyre!("the postgres revocation backend requires postgres.url")
            })?;
            Arc::new(PostgresBannedTokenStore::new(pg_pool.clone()))
        }
        RevocationBackend::Redis => {
            let conn = get_redis_client(redis_hostname)?
                .get_multiplexed_async_connection()
                .await?;
            Arc::new(RedisBannedTokenStore::new(conn))
        }
    };

    Ok(store)
}

/// Periodically drop revocation entries whose tokens have expired.
pub fn spawn_banned_token_pruner(
    store: Arc<dyn BannedTokenStore>,
    every: Duration,
) -> JoinHandle<()> {
    let every = every.max(Duration::from_secs(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            match store.prune_expired().await {
                Ok(0) => {}
                Ok(pruned) => tracing::info!(pruned, "pruned expired banned tokens"),
                Err(e) => tracing::warn!(error = %e, "failed to prune banned tokens"),
            }
        }
    })
}
