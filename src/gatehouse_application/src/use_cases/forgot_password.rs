use askama::Template;
use chrono::Duration;
use gatehouse_core::{
    Clock, Email, EmailClient, ResetToken, ResetTokenStore, ResetTokenStoreError, UserStoreError,
};

use crate::identity::{IdentityLookup, LookupError};

const RESET_EMAIL_SUBJECT: &str = "Password Reset";

/// Error types for forgot password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User not found")]
    UserNotFound,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Reset token store error: {0}")]
    ResetTokenStoreError(#[from] ResetTokenStoreError),
    #[error("Failed to render reset email: {0}")]
    TemplateError(#[from] askama::Error),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

#[derive(Template)]
#[template(path = "password_reset.txt")]
struct PasswordResetEmail<'a> {
    reset_url: &'a str,
    valid_for_minutes: i64,
}

/// Forgot password use case - issues a reset token and emails the link
pub struct ForgotPasswordUseCase<'a> {
    identity: IdentityLookup<'a>,
    reset_token_store: &'a dyn ResetTokenStore,
    email_client: &'a dyn EmailClient,
    clock: &'a dyn Clock,
    token_ttl: Duration,
    reset_url_base: &'a str,
}

impl<'a> ForgotPasswordUseCase<'a> {
    pub fn new(
        identity: IdentityLookup<'a>,
        reset_token_store: &'a dyn ResetTokenStore,
        email_client: &'a dyn EmailClient,
        clock: &'a dyn Clock,
        token_ttl: Duration,
        reset_url_base: &'a str,
    ) -> Self {
        Self {
            identity,
            reset_token_store,
            email_client,
            clock,
            token_ttl,
            reset_url_base,
        }
    }

    /// Execute the forgot password use case
    ///
    /// # Returns
    /// The issued token, or `None` when unknown users are concealed and the
    /// email matched nobody. A failed delivery is an error, but the token has
    /// already been stored by then and stays valid.
    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &Email) -> Result<Option<ResetToken>, ForgotPasswordError> {
        let user = match self.identity.by_email(email).await {
            Ok(user) => user,
            Err(LookupError::UnknownUser) => return Err(ForgotPasswordError::UserNotFound),
            Err(LookupError::InvalidCredentials) => {
                tracing::info!("reset requested for unknown email, nothing sent");
                return Ok(None);
            }
            Err(LookupError::UserStoreError(e)) => {
                return Err(ForgotPasswordError::UserStoreError(e));
            }
        };

        let token = ResetToken::generate();
        let expires_at = self.clock.now() + self.token_ttl;
        self.reset_token_store
            .store_reset_token(user.email(), &token, expires_at)
            .await?;

        let reset_url = format!("{}?token={}", self.reset_url_base, token.as_str());
        let content = PasswordResetEmail {
            reset_url: &reset_url,
            valid_for_minutes: self.token_ttl.num_minutes(),
        }
        .render()?;

        self.email_client
            .send_email(user.email(), RESET_EMAIL_SUBJECT, &content)
            .await
            .map_err(ForgotPasswordError::EmailError)?;

        tracing::info!(user_id = %user.id(), "password reset email sent");
        Ok(Some(token))
    }
}
