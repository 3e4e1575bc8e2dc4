use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use gatehouse_application::{RegisterRequest, SignedIn};
use gatehouse_core::UserProfile;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

/// Body of a successful register or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<SignedIn> for AuthResponse {
    fn from(signed_in: SignedIn) -> Self {
        Self {
            user: signed_in.user,
            access_token: signed_in.tokens.access_token.token,
            refresh_token: signed_in.tokens.refresh_token.token,
        }
    }
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let Json(request) = payload?;

    let signed_in = state.core.register(request).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(signed_in))))
}
