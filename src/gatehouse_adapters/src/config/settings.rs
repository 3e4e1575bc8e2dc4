use std::{path::PathBuf, time::Duration};

use ::config::{ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use gatehouse_application::AuthConfig;
use ::http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    config::constants::{DEFAULT_CONFIG_DIR, env, prod},
    tokens::JwtConfig,
};

pub type Config = ConfigBuilder<DefaultState>;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    pub environment: AppEnvironment,
    pub allowed_origins: AllowedOrigins,
    /// Seconds between sweeps of expired revocation entries.
    pub prune_interval_in_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    pub fn is_development(&self) -> bool {
        matches!(self, AppEnvironment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub reset_token_ttl_in_seconds: i64,
    pub reset_url_base: String,
    pub conceal_unknown_users: bool,
    pub revocation_backend: RevocationBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
}

/// Where revoked tokens are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationBackend {
    Memory,
    Postgres,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    /// When absent the service keeps users and reset tokens in memory.
    pub url: Option<Secret<String>>,
    pub max_connections: u32,
    pub acquire_timeout_in_millis: u64,
}

impl PostgresSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    /// When absent reset emails are logged instead of delivered.
    pub auth_token: Option<Secret<String>>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// CORS allow-list. An empty list means any origin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    pub fn header_values(&self) -> Vec<HeaderValue> {
        self.0
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }
}

impl AuthServiceSetting {
    /// Loads `base.json`, then `<environment>.json`, then `APP__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| AppEnvironment::Development.as_str().to_owned());
        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        Self::builder()?
            .add_source(File::from(config_dir.join("base")).required(false))
            .add_source(File::from(config_dir.join(&environment)).required(false))
            .set_override("application.environment", environment)?
            .add_source(
                Environment::with_prefix(env::APP_ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(env::APP_ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Defaults for everything except the JWT secret.
    pub fn builder() -> Result<Config, ConfigError> {
        ::config::Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("application.environment", "development")?
            .set_default("application.allowed_origins", Vec::<String>::new())?
            .set_default("application.prune_interval_in_seconds", 300)?
            .set_default("auth.jwt.access_token_ttl_in_seconds", 15 * 60)?
            .set_default("auth.jwt.refresh_token_ttl_in_seconds", 24 * 60 * 60)?
            .set_default("auth.reset_token_ttl_in_seconds", 60 * 60)?
            .set_default(
                "auth.reset_url_base",
                "http://localhost:3000/reset-password",
            )?
            .set_default("auth.conceal_unknown_users", false)?
            .set_default("auth.revocation_backend", "memory")?
            .set_default("postgres.max_connections", 5)?
            .set_default("postgres.acquire_timeout_in_millis", 3_000)?
            .set_default("redis.host_name", "127.0.0.1")?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", "no-reply@localhost")?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_IN_MILLIS,
            )
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            reset_token_ttl: chrono::Duration::seconds(self.auth.reset_token_ttl_in_seconds),
            reset_url_base: self.auth.reset_url_base.clone(),
            conceal_unknown_users: self.auth.conceal_unknown_users,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.auth.jwt.secret.clone(),
            access_token_ttl_in_seconds: self.auth.jwt.access_token_ttl_in_seconds,
            refresh_token_ttl_in_seconds: self.auth.jwt.refresh_token_ttl_in_seconds,
        }
    }
}
