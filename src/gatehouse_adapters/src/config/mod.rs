pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppEnvironment, ApplicationSettings, AuthServiceSetting, AuthSettings,
    EmailClientSettings, JwtSettings, PostgresSettings, RedisSettings, RevocationBackend,
};
