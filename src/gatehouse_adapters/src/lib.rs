pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod persistence;
pub mod tokens;

pub use self::config::{AppEnvironment, AuthServiceSetting, RevocationBackend};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use hashing::Argon2PasswordHasher;
pub use self::http::{AppState, AuthApiError, AuthenticatedUser};
pub use persistence::{
    DashMapBannedTokenStore, HashMapResetTokenStore, HashMapUserStore, MIGRATOR,
    PostgresBannedTokenStore, PostgresResetTokenStore, PostgresUserStore, RedisBannedTokenStore,
};
pub use tokens::{JwtConfig, JwtTokenCodec};
