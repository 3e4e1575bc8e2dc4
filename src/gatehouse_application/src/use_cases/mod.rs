pub mod authenticate;
pub mod forgot_password;
pub mod get_profile;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod reset_password;

use gatehouse_core::{AuthTokens, Email, TokenCodec, TokenError, TokenKind};

/// Issues a fresh access + refresh pair bound to `email`.
pub(crate) fn issue_tokens(
    token_codec: &dyn TokenCodec,
    email: &Email,
) -> Result<AuthTokens, TokenError> {
    Ok(AuthTokens {
        access_token: token_codec.issue(email, TokenKind::Access)?,
        refresh_token: token_codec.issue(email, TokenKind::Refresh)?,
    })
}
