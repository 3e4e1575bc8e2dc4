//! In-memory collaborators for the use case tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gatehouse_core::{
    BannedTokenStore, BannedTokenStoreError, Clock, DisplayName, Email, EmailClient, HasherError,
    IssuedToken, Password, PasswordHash, PasswordHasher, PasswordResetRequest, ResetToken,
    ResetTokenStore, ResetTokenStoreError, TokenClaims, TokenCodec, TokenError, TokenKind, User,
    UserName, UserStore, UserStoreError,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

use crate::{AuthConfig, AuthCore};

pub const DEFAULT_PASSWORD: &str = "Secret123!";

/// A user named "Alice" whose password is [`DEFAULT_PASSWORD`].
pub fn user(email: &str, user_name: Option<&str>) -> User {
    User::new(
        DisplayName::parse("Alice").unwrap(),
        user_name.map(|u| UserName::parse(u).unwrap()),
        Email::try_from(email.to_string()).unwrap(),
        FakeHasher::hash_str(DEFAULT_PASSWORD),
    )
}

#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Utc::now())))
    }
}

impl ManualClock {
    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock().unwrap() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Reversible "hash" so tests stay fast.
pub struct FakeHasher;

impl FakeHasher {
    fn hash_str(password: &str) -> PasswordHash {
        PasswordHash::new(format!("fake-hash:{password}"))
    }
}

#[async_trait]
impl PasswordHasher for FakeHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HasherError> {
        Ok(Self::hash_str(password.as_ref().expose_secret()))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HasherError> {
        Ok(Self::hash_str(password.as_ref().expose_secret())
            .as_ref()
            .expose_secret()
            == hash.as_ref().expose_secret())
    }
}

/// Unsigned `kind|sub|exp|jti` tokens.
#[derive(Default)]
pub struct FakeTokenCodec {
    issued: AtomicUsize,
}

impl FakeTokenCodec {
    pub fn issued_count(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

impl TokenCodec for FakeTokenCodec {
    fn issue(&self, subject: &Email, kind: TokenKind) -> Result<IssuedToken, TokenError> {
        let ttl = match kind {
            TokenKind::Access => Duration::minutes(15),
            TokenKind::Refresh => Duration::hours(24),
        };
        let expires_at = Utc::now() + ttl;
        self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(IssuedToken {
            token: format!(
                "{kind}|{}|{}|{}",
                subject.as_str(),
                expires_at.timestamp(),
                uuid::Uuid::new_v4()
            ),
            expires_at,
        })
    }

    fn verify(&self, token: &str, kind: Option<TokenKind>) -> Result<TokenClaims, TokenError> {
        let parts: Vec<&str> = token.split('|').collect();
        let [token_kind, sub, exp, jti] = parts.as_slice() else {
            return Err(TokenError::InvalidToken);
        };
        let token_kind = match *token_kind {
            "access" => TokenKind::Access,
            "refresh" => TokenKind::Refresh,
            _ => return Err(TokenError::InvalidToken),
        };
        match kind {
            Some(expected) if expected != token_kind => {
                return Err(TokenError::WrongKind { expected });
            }
            _ => {}
        }
        let exp: i64 = exp.parse().map_err(|_| TokenError::InvalidToken)?;
        if exp <= Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }
        Ok(TokenClaims {
            sub: sub.to_string(),
            exp,
            iat: exp,
            jti: jti.to_string(),
            kind: token_kind,
        })
    }
}

#[derive(Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Email, User>>>,
}

impl InMemoryUserStore {
    pub fn with_users(users: Vec<User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.email().clone(), user))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user_name_taken = user.user_name().is_some_and(|name| {
            users
                .values()
                .any(|existing| existing.user_name() == Some(name))
        });
        if users.contains_key(user.email()) || user_name_taken {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.email().clone(), user);
        Ok(())
    }

    async fn get_user(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.is_identified_by(identifier))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update_password(
        &self,
        email: &Email,
        password_hash: PasswordHash,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.remove(email).ok_or(UserStoreError::UserNotFound)?;
        users.insert(email.clone(), user.with_password_hash(password_hash));
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn remove_all(&self) -> Result<(), UserStoreError> {
        self.users.write().await.clear();
        Ok(())
    }
}

#[derive(Clone)]
pub struct InMemoryBannedTokenStore {
    tokens: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    clock: ManualClock,
}

impl InMemoryBannedTokenStore {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            tokens: Arc::default(),
            clock,
        }
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl BannedTokenStore for InMemoryBannedTokenStore {
    async fn ban_token(
        &self,
        token: String,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, BannedTokenStoreError> {
        let now = self.clock.now();
        let mut tokens = self.tokens.write().await;
        if tokens.get(&token).is_some_and(|existing| now < *existing) {
            return Ok(false);
        }
        tokens.insert(token, expires_at);
        Ok(true)
    }

    async fn is_banned(&self, token: &str) -> Result<bool, BannedTokenStoreError> {
        let now = self.clock.now();
        Ok(self
            .tokens
            .read()
            .await
            .get(token)
            .is_some_and(|expires_at| now < *expires_at))
    }

    async fn prune_expired(&self) -> Result<u64, BannedTokenStoreError> {
        let now = self.clock.now();
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, expires_at| now < *expires_at);
        Ok((before - tokens.len()) as u64)
    }
}

#[derive(Clone)]
pub struct InMemoryResetTokenStore {
    requests: Arc<RwLock<HashMap<Email, PasswordResetRequest>>>,
    clock: ManualClock,
    unavailable: bool,
}

impl InMemoryResetTokenStore {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            requests: Arc::default(),
            clock,
            unavailable: false,
        }
    }

    /// Every claim on a token fails as if the database were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn check_available(&self) -> Result<(), ResetTokenStoreError> {
        if self.unavailable {
            return Err(ResetTokenStoreError::UnexpectedError(
                "connection reset".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn token_for(&self, email: &Email) -> Option<ResetToken> {
        self.requests
            .read()
            .await
            .get(email)
            .map(|request| request.token.clone())
    }
}

#[async_trait]
impl ResetTokenStore for InMemoryResetTokenStore {
    async fn store_reset_token(
        &self,
        email: &Email,
        token: &ResetToken,
        expires_at: DateTime<Utc>,
    ) -> Result<(), ResetTokenStoreError> {
        let request = PasswordResetRequest {
            email: email.clone(),
            token: token.clone(),
            expires_at,
        };
        self.requests.write().await.insert(email.clone(), request);
        Ok(())
    }

    async fn find_email_by_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        let now = self.clock.now();
        self.requests
            .read()
            .await
            .values()
            .find(|request| &request.token == token && request.is_valid_at(now))
            .map(|request| request.email.clone())
            .ok_or(ResetTokenStoreError::InvalidToken)
    }

    async fn invalidate_token(&self, token: &ResetToken) -> Result<(), ResetTokenStoreError> {
        self.check_available()?;
        self.requests
            .write()
            .await
            .retain(|_, request| &request.token != token);
        Ok(())
    }

    async fn consume_token(&self, token: &ResetToken) -> Result<Email, ResetTokenStoreError> {
        self.check_available()?;
        let now = self.clock.now();
        let mut requests = self.requests.write().await;
        let email = requests
            .values()
            .find(|request| &request.token == token)
            .map(|request| request.email.clone())
            .ok_or(ResetTokenStoreError::InvalidToken)?;
        let request = requests
            .remove(&email)
            .ok_or(ResetTokenStoreError::InvalidToken)?;

        if request.is_valid_at(now) {
            Ok(email)
        } else {
            Err(ResetTokenStoreError::InvalidToken)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

#[derive(Default, Clone)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl RecordingEmailClient {
    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_str().to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

pub struct FailingEmailClient;

#[async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_email(&self, _: &Email, _: &str, _: &str) -> Result<(), String> {
        Err("smtp unavailable".to_string())
    }
}

/// An [`AuthCore`] wired to in-memory collaborators.
pub struct Harness {
    pub core: AuthCore,
    pub codec: Arc<FakeTokenCodec>,
    pub emails: RecordingEmailClient,
    pub clock: ManualClock,
}

impl Harness {
    pub fn new() -> Self {
        let clock = ManualClock::default();
        let codec = Arc::new(FakeTokenCodec::default());
        let emails = RecordingEmailClient::default();
        let core = AuthCore::new(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(InMemoryBannedTokenStore::new(clock.clone())),
            Arc::new(InMemoryResetTokenStore::new(clock.clone())),
            Arc::new(FakeHasher),
            codec.clone(),
            Arc::new(emails.clone()),
            AuthConfig::default(),
        )
        .with_clock(Arc::new(clock.clone()));

        Self {
            core,
            codec,
            emails,
            clock,
        }
    }
}
