use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};
use gatehouse_application::LoginRequest;

use super::{error::AuthApiError, register::AuthResponse};
use crate::http::AppState;

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let Json(request) = payload?;

    let signed_in = state.core.login(request).await?;

    Ok(Json(AuthResponse::from(signed_in)))
}
