use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use gatehouse_core::Email;

use super::{AppState, routes::AuthApiError};

/// Caller identity attached to requests that passed [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: Email,
    /// The bearer token exactly as presented.
    pub token: String,
}

/// Rejects requests without a valid, unrevoked access token.
#[tracing::instrument(name = "Authenticating request", skip_all)]
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|_| AuthApiError::MissingToken)?;
    let token = bearer.token().to_owned();

    let email = state.core.authenticate(&token).await?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { email, token });
    Ok(next.run(request).await)
}
