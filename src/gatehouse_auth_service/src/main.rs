use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use gatehouse_adapters::{
    Argon2PasswordHasher, AuthServiceSetting, HashMapResetTokenStore, HashMapUserStore,
    JwtTokenCodec, MockEmailClient, PostgresResetTokenStore, PostgresUserStore,
    PostmarkEmailClient, http::AppState,
};
use gatehouse_application::AuthCore;
use gatehouse_auth_service::{
    AuthService,
    helpers::{configure_banned_token_store, configure_postgresql, spawn_banned_token_pruner},
    tracing::init_tracing,
};
use gatehouse_core::{Email, EmailClient, ResetTokenStore, UserStore};
use reqwest::{Client as HttpClient, Url};
use secrecy::Secret;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = AuthServiceSetting::load()?;
    let environment = config.application.environment;
    tracing::info!(environment = environment.as_str(), "configuration loaded");

    let pg_pool = match &config.postgres.url {
        Some(url) => Some(configure_postgresql(url, &config.postgres).await?),
        None => {
            tracing::warn!("postgres.url is not set, users and reset tokens are kept in memory");
            None
        }
    };

    let (user_store, reset_token_store): (Arc<dyn UserStore>, Arc<dyn ResetTokenStore>) =
        match &pg_pool {
            Some(pool) => (
                Arc::new(PostgresUserStore::new(pool.clone())),
                Arc::new(PostgresResetTokenStore::new(pool.clone())),
            ),
            None => (
                Arc::new(HashMapUserStore::new()),
                Arc::new(HashMapResetTokenStore::new()),
            ),
        };

    let banned_token_store = configure_banned_token_store(
        config.auth.revocation_backend,
        pg_pool.as_ref(),
        &config.redis.host_name,
    )
    .await?;

    let email_client: Arc<dyn EmailClient> = match &config.email_client.auth_token {
        Some(auth_token) => {
            let http_client = HttpClient::builder()
                .timeout(config.email_client.timeout())
                .build()?;

            Arc::new(PostmarkEmailClient::new(
                Url::parse(&config.email_client.base_url)?,
                Email::try_from(Secret::new(config.email_client.sender.clone()))?,
                auth_token.clone(),
                http_client,
            ))
        }
        None => {
            tracing::warn!("email_client.auth_token is not set, emails are logged, not sent");
            Arc::new(MockEmailClient::new())
        }
    };

    let core = AuthCore::new(
        user_store,
        banned_token_store.clone(),
        reset_token_store,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(JwtTokenCodec::new(config.jwt_config())),
        email_client,
        config.auth_config(),
    );

    spawn_banned_token_pruner(
        banned_token_store,
        Duration::from_secs(config.application.prune_interval_in_seconds),
    );

    let state = AppState::new(core).exposing_reset_tokens(environment.is_development());
    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;

    AuthService::with_state(state)
        .run_standalone(listener, Some(config.application.allowed_origins.clone()))
        .await?;

    Ok(())
}
