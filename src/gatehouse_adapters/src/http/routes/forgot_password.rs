use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ForgotPasswordResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

const RESET_REQUESTED: &str = "If the account exists, a password reset email has been sent";

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    payload: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let Json(request) = payload?;

    let token = state.core.forgot_password(request.email).await?;

    Ok(Json(ForgotPasswordResponse {
        message: RESET_REQUESTED.to_string(),
        token: token
            .filter(|_| state.expose_reset_tokens)
            .map(|token| token.as_str().to_owned()),
    }))
}
