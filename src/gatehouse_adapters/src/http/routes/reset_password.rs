use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use gatehouse_application::ResetPasswordRequest;
use serde::{Deserialize, Serialize};

use super::error::AuthApiError;
use crate::http::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    payload: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let Json(request) = payload?;

    state.core.reset_password(request).await?;

    Ok(Json(MessageResponse {
        message: "Password has been reset".to_string(),
    }))
}
