use gatehouse_core::{
    AuthTokens, BannedTokenStore, BannedTokenStoreError, Email, TokenCodec, TokenError, TokenKind,
    UserError, UserStore, UserStoreError,
};

use super::issue_tokens;

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("{0}")]
    TokenError(#[from] TokenError),
    #[error("Token has been revoked")]
    TokenRevoked,
    #[error("Token subject is not a valid email: {0}")]
    InvalidSubject(#[from] UserError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Banned token store error: {0}")]
    BannedTokenStoreError(#[from] BannedTokenStoreError),
}

/// Refresh use case - trades a refresh token for a new token pair.
///
/// The presented refresh token is revoked before anything is issued. Banning
/// is the claim: of concurrent refreshes with one token, only the caller whose
/// ban was recorded gets a new pair.
pub struct RefreshUseCase<'a> {
    user_store: &'a dyn UserStore,
    banned_token_store: &'a dyn BannedTokenStore,
    token_codec: &'a dyn TokenCodec,
}

impl<'a> RefreshUseCase<'a> {
    pub fn new(
        user_store: &'a dyn UserStore,
        banned_token_store: &'a dyn BannedTokenStore,
        token_codec: &'a dyn TokenCodec,
    ) -> Self {
        Self {
            user_store,
            banned_token_store,
            token_codec,
        }
    }

    #[tracing::instrument(name = "RefreshUseCase::execute", skip_all)]
    pub async fn execute(&self, refresh_token: String) -> Result<AuthTokens, RefreshError> {
        let claims = self
            .token_codec
            .verify(&refresh_token, Some(TokenKind::Refresh))?;

        let email = Email::try_from(claims.sub.clone())?;
        let expires_at = claims.expires_at().ok_or(TokenError::InvalidToken)?;

        let claimed = self
            .banned_token_store
            .ban_token(refresh_token, expires_at)
            .await?;
        if !claimed {
            return Err(RefreshError::TokenRevoked);
        }

        let user = self.user_store.get_user(&email).await?;

        Ok(issue_tokens(self.token_codec, user.email())?)
    }
}
