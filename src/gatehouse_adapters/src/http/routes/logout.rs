use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use super::error::AuthApiError;
use crate::http::{AppState, AuthenticatedUser};

#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Revokes the bearer access token. A JSON body carrying the session's
/// `refresh_token` revokes that too; without it the body may be omitted.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    payload: Result<Json<LogoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AuthApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => LogoutRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    state
        .core
        .logout(caller.token, request.refresh_token)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
