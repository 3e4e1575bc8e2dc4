use gatehouse_core::{
    BannedTokenStore, BannedTokenStoreError, Email, TokenCodec, TokenError, TokenKind, UserError,
};

#[derive(Debug, thiserror::Error)]
pub enum AuthenticateError {
    #[error("{0}")]
    TokenError(#[from] TokenError),
    #[error("Token has been revoked")]
    TokenRevoked,
    #[error("Token subject is not a valid email: {0}")]
    InvalidSubject(#[from] UserError),
    #[error("Banned token store error: {0}")]
    BannedTokenStoreError(#[from] BannedTokenStoreError),
}

/// Authenticate use case - turns a presented access token into the caller's
/// email. Stateless verification first, then the revocation list.
pub struct AuthenticateUseCase<'a> {
    token_codec: &'a dyn TokenCodec,
    banned_token_store: &'a dyn BannedTokenStore,
}

impl<'a> AuthenticateUseCase<'a> {
    pub fn new(
        token_codec: &'a dyn TokenCodec,
        banned_token_store: &'a dyn BannedTokenStore,
    ) -> Self {
        Self {
            token_codec,
            banned_token_store,
        }
    }

    #[tracing::instrument(name = "AuthenticateUseCase::execute", skip_all)]
    pub async fn execute(&self, token: &str) -> Result<Email, AuthenticateError> {
        let claims = self.token_codec.verify(token, Some(TokenKind::Access))?;

        if self.banned_token_store.is_banned(token).await? {
            return Err(AuthenticateError::TokenRevoked);
        }

        Ok(Email::try_from(claims.sub)?)
    }
}
