use std::sync::Arc;

use gatehouse_core::{
    AuthTokens, BannedTokenStore, Clock, DisplayName, Email, EmailClient, Password,
    PasswordHasher, ResetToken, ResetTokenStore, SystemClock, TokenCodec, UserError, UserName,
    UserProfile, UserStore,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    config::AuthConfig,
    identity::IdentityLookup,
    use_cases::{
        authenticate::{AuthenticateError, AuthenticateUseCase},
        forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
        get_profile::{GetProfileUseCase, ProfileError},
        list_users::{ListUsersError, ListUsersUseCase},
        login::{LoginError, LoginUseCase},
        logout::{LogoutError, LogoutUseCase},
        refresh::{RefreshError, RefreshUseCase},
        register::{NewUser, RegisterError, RegisterUseCase},
        reset_password::{ResetPasswordError, ResetPasswordUseCase},
    },
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address or user name.
    pub identifier: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Secret<String>,
    pub new_password: Secret<String>,
    pub confirm_password: Secret<String>,
}

/// What register and login hand back: the public profile plus tokens.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserProfile,
    pub tokens: AuthTokens,
}

/// Input rejected before any store was touched.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub UserError);

#[derive(Debug, thiserror::Error)]
pub enum CoreError<E> {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Operation(E),
}

/// Orchestrates the authentication use cases over shared collaborators.
///
/// Cheap to clone: every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AuthCore {
    user_store: Arc<dyn UserStore>,
    banned_token_store: Arc<dyn BannedTokenStore>,
    reset_token_store: Arc<dyn ResetTokenStore>,
    hasher: Arc<dyn PasswordHasher>,
    token_codec: Arc<dyn TokenCodec>,
    email_client: Arc<dyn EmailClient>,
    clock: Arc<dyn Clock>,
    config: AuthConfig,
}

impl AuthCore {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        banned_token_store: Arc<dyn BannedTokenStore>,
        reset_token_store: Arc<dyn ResetTokenStore>,
        hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn TokenCodec>,
        email_client: Arc<dyn EmailClient>,
        config: AuthConfig,
    ) -> Self {
        Self {
            user_store,
            banned_token_store,
            reset_token_store,
            hasher,
            token_codec,
            email_client,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn identity(&self) -> IdentityLookup<'_> {
        IdentityLookup::new(self.user_store.as_ref(), self.config.conceal_unknown_users)
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<SignedIn, CoreError<RegisterError>> {
        let new_user = NewUser {
            name: DisplayName::parse(&request.name).map_err(ValidationError)?,
            user_name: request
                .user_name
                .as_deref()
                .map(UserName::parse)
                .transpose()
                .map_err(ValidationError)?,
            email: Email::try_from(request.email).map_err(ValidationError)?,
            password: Password::with_confirmation(request.password, &request.confirm_password)
                .map_err(ValidationError)?,
        };

        let (user, tokens) = RegisterUseCase::new(
            self.user_store.as_ref(),
            self.hasher.as_ref(),
            self.token_codec.as_ref(),
        )
        .execute(new_user)
        .await
        .map_err(CoreError::Operation)?;

        Ok(SignedIn {
            user: user.profile(),
            tokens,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<SignedIn, CoreError<LoginError>> {
        let password = Password::candidate(request.password).map_err(ValidationError)?;
        let identifier = request.identifier.trim();

        let (user, tokens) = LoginUseCase::new(
            self.identity(),
            self.hasher.as_ref(),
            self.token_codec.as_ref(),
        )
        .execute(identifier, password)
        .await
        .map_err(CoreError::Operation)?;

        Ok(SignedIn {
            user: user.profile(),
            tokens,
        })
    }

    /// Revokes `token` and, when given, the refresh token of the same session.
    pub async fn logout(
        &self,
        token: String,
        refresh_token: Option<String>,
    ) -> Result<(), LogoutError> {
        LogoutUseCase::new(self.token_codec.as_ref(), self.banned_token_store.as_ref())
            .execute(token, refresh_token)
            .await
    }

    /// Resolves a bearer access token to the caller's email, rejecting
    /// revoked tokens.
    pub async fn authenticate(&self, token: &str) -> Result<Email, AuthenticateError> {
        AuthenticateUseCase::new(self.token_codec.as_ref(), self.banned_token_store.as_ref())
            .execute(token)
            .await
    }

    pub async fn profile(&self, email: &Email) -> Result<UserProfile, ProfileError> {
        GetProfileUseCase::new(self.user_store.as_ref())
            .execute(email)
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ListUsersError> {
        ListUsersUseCase::new(self.user_store.as_ref())
            .execute()
            .await
    }

    pub async fn forgot_password(
        &self,
        email: Secret<String>,
    ) -> Result<Option<ResetToken>, CoreError<ForgotPasswordError>> {
        let email = Email::try_from(email).map_err(ValidationError)?;

        ForgotPasswordUseCase::new(
            self.identity(),
            self.reset_token_store.as_ref(),
            self.email_client.as_ref(),
            self.clock.as_ref(),
            self.config.reset_token_ttl,
            &self.config.reset_url_base,
        )
        .execute(&email)
        .await
        .map_err(CoreError::Operation)
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<(), CoreError<ResetPasswordError>> {
        let token = ResetToken::parse(request.token).map_err(ValidationError)?;
        let new_password =
            Password::with_confirmation(request.new_password, &request.confirm_password)
                .map_err(ValidationError)?;

        ResetPasswordUseCase::new(
            self.user_store.as_ref(),
            self.reset_token_store.as_ref(),
            self.hasher.as_ref(),
        )
        .execute(token, new_password)
        .await
        .map_err(CoreError::Operation)
    }

    pub async fn refresh(&self, refresh_token: String) -> Result<AuthTokens, RefreshError> {
        RefreshUseCase::new(
            self.user_store.as_ref(),
            self.banned_token_store.as_ref(),
            self.token_codec.as_ref(),
        )
        .execute(refresh_token)
        .await
    }
}
