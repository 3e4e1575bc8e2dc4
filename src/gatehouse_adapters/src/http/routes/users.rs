use axum::{Json, extract::State, response::IntoResponse};

use super::error::AuthApiError;
use crate::http::AppState;

#[tracing::instrument(name = "List users", skip_all)]
pub async fn users(State(state): State<AppState>) -> Result<impl IntoResponse, AuthApiError> {
    let profiles = state.core.list_users().await?;

    Ok(Json(profiles))
}
