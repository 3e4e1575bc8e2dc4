pub mod dashmap_banned_token_store;
pub mod hashmap_reset_token_store;
pub mod hashmap_user_store;
pub mod postgres_banned_token_store;
pub mod postgres_reset_token_store;
pub mod postgres_user_store;
pub mod redis_banned_token_store;

pub use dashmap_banned_token_store::DashMapBannedTokenStore;
pub use hashmap_reset_token_store::HashMapResetTokenStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_banned_token_store::PostgresBannedTokenStore;
pub use postgres_reset_token_store::PostgresResetTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_banned_token_store::RedisBannedTokenStore;

/// Schema for the Postgres stores.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
