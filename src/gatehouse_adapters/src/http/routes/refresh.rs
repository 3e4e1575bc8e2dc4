use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Trades a refresh token for a new pair. The presented token is revoked.
#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let Json(request) = payload?;

    let tokens = state.core.refresh(request.refresh_token).await?;

    Ok(Json(TokenPairResponse {
        access_token: tokens.access_token.token,
        refresh_token: tokens.refresh_token.token,
    }))
}
