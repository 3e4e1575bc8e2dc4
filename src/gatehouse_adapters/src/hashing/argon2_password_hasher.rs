use argon2::{
    Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::{self, SaltString, rand_core},
};
use async_trait::async_trait;
use gatehouse_core::{HasherError, Password, PasswordHash, PasswordHasher};
use secrecy::{ExposeSecret, Secret};

/// Argon2id in PHC string format. Work runs on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        let password = password.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let salt = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.expose_secret().as_bytes(), &salt)
                    .map(|hash| PasswordHash::new(hash.to_string()))
                    .map_err(|e| e.to_string())
            })
        })
        .await
        .map_err(|e| HasherError::HashingFailed(e.to_string()))?
        .map_err(HasherError::HashingFailed)
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError> {
        let password = password.as_ref().clone();
        let expected: Secret<String> = hash.as_ref().clone();
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = password_hash::PasswordHash::new(expected.expose_secret())
                    .map_err(|e| HasherError::MalformedHash(e.to_string()))?;
                let argon2 = argon2().map_err(HasherError::HashingFailed)?;

                match argon2.verify_password(password.expose_secret().as_bytes(), &expected) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HasherError::HashingFailed(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HasherError::HashingFailed(e.to_string()))?
    }
}
