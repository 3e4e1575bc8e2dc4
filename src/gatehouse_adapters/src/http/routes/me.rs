use axum::{Extension, Json, extract::State, response::IntoResponse};

use super::error::AuthApiError;
use crate::http::{AppState, AuthenticatedUser};

#[tracing::instrument(name = "Profile", skip_all)]
pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<impl IntoResponse, AuthApiError> {
    let profile = state.core.profile(&caller.email).await?;

    Ok(Json(profile))
}
