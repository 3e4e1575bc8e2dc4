use gatehouse_core::{
    BannedTokenStore, BannedTokenStoreError, TokenClaims, TokenCodec, TokenError, TokenKind,
};

/// Error types for logout use case
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Invalid token")]
    InvalidToken(#[from] TokenError),
    #[error("Refresh token belongs to another user")]
    SubjectMismatch,
    #[error("Banned token store error: {0}")]
    BannedTokenStoreError(#[from] BannedTokenStoreError),
}

/// Logout use case - revokes a bearer token until it would have expired,
/// together with the session's refresh token when one is presented
pub struct LogoutUseCase<'a> {
    token_codec: &'a dyn TokenCodec,
    banned_token_store: &'a dyn BannedTokenStore,
}

impl<'a> LogoutUseCase<'a> {
    pub fn new(
        token_codec: &'a dyn TokenCodec,
        banned_token_store: &'a dyn BannedTokenStore,
    ) -> Self {
        Self {
            token_codec,
            banned_token_store,
        }
    }

    /// Execute the logout use case
    ///
    /// # Arguments
    /// * `token` - The JWT token to invalidate, exactly as presented
    /// * `refresh_token` - Optional refresh token issued with it; must name the same subject
    ///
    /// Both tokens are verified before either is revoked.
    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: String,
        refresh_token: Option<String>,
    ) -> Result<(), LogoutError> {
        let claims = self.token_codec.verify(&token, None)?;

        let refresh = match refresh_token {
            Some(refresh_token) => {
                let refresh_claims = self
                    .token_codec
                    .verify(&refresh_token, Some(TokenKind::Refresh))?;
                if refresh_claims.sub != claims.sub {
                    return Err(LogoutError::SubjectMismatch);
                }
                Some((refresh_token, refresh_claims))
            }
            None => None,
        };

        self.revoke(token, &claims).await?;
        if let Some((refresh_token, refresh_claims)) = refresh {
            self.revoke(refresh_token, &refresh_claims).await?;
        }

        Ok(())
    }

    async fn revoke(&self, token: String, claims: &TokenClaims) -> Result<(), LogoutError> {
        let expires_at = claims.expires_at().ok_or(TokenError::InvalidToken)?;

        // Already revoked is fine; logout stays idempotent.
        self.banned_token_store.ban_token(token, expires_at).await?;
        tracing::info!(kind = %claims.kind, "token revoked");

        Ok(())
    }
}
