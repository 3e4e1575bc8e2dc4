use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_application::{
    AuthenticateError, CoreError, ForgotPasswordError, ListUsersError, LoginError, LogoutError,
    ProfileError, RefreshError, RegisterError, ResetPasswordError, ValidationError,
};
use gatehouse_core::UserStoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AuthApiError {
    #[error("User not found")]
    UserNotFound,

    #[error("No account is registered for this email")]
    EmailNotRegistered,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing or malformed bearer token")]
    MissingToken,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AuthApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AuthApiError::UserAlreadyExists => (StatusCode::CONFLICT, self.to_string()),

            AuthApiError::EmailNotRegistered => (StatusCode::NOT_FOUND, self.to_string()),

            AuthApiError::AuthenticationError(_)
            | AuthApiError::UserNotFound
            | AuthApiError::MissingToken => (StatusCode::UNAUTHORIZED, self.to_string()),

            AuthApiError::UnexpectedError(ref e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<JsonRejection> for AuthApiError {
    fn from(rejection: JsonRejection) -> Self {
        AuthApiError::InvalidInput(rejection.body_text())
    }
}

impl From<ValidationError> for AuthApiError {
    fn from(error: ValidationError) -> Self {
        AuthApiError::InvalidInput(error.to_string())
    }
}

impl<E> From<CoreError<E>> for AuthApiError
where
    AuthApiError: From<E>,
{
    fn from(error: CoreError<E>) -> Self {
        match error {
            CoreError::Validation(e) => e.into(),
            CoreError::Operation(e) => e.into(),
        }
    }
}

impl From<UserStoreError> for AuthApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => AuthApiError::UserAlreadyExists,
            UserStoreError::UserNotFound => AuthApiError::UserNotFound,
            UserStoreError::UnexpectedError(e) => AuthApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for AuthApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserAlreadyExists => AuthApiError::UserAlreadyExists,
            RegisterError::UserStoreError(e) => e.into(),
            e @ (RegisterError::HasherError(_) | RegisterError::TokenError(_)) => {
                AuthApiError::UnexpectedError(e.to_string())
            }
        }
    }
}

impl From<LoginError> for AuthApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => AuthApiError::UserNotFound,
            LoginError::InvalidCredentials => AuthApiError::AuthenticationError(error.to_string()),
            LoginError::UserStoreError(e) => e.into(),
            e @ (LoginError::HasherError(_) | LoginError::TokenError(_)) => {
                AuthApiError::UnexpectedError(e.to_string())
            }
        }
    }
}

impl From<LogoutError> for AuthApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::InvalidToken(_) | LogoutError::SubjectMismatch => {
                AuthApiError::AuthenticationError(error.to_string())
            }
            LogoutError::BannedTokenStoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<AuthenticateError> for AuthApiError {
    fn from(error: AuthenticateError) -> Self {
        match error {
            AuthenticateError::BannedTokenStoreError(e) => {
                AuthApiError::UnexpectedError(e.to_string())
            }
            e => AuthApiError::AuthenticationError(e.to_string()),
        }
    }
}

impl From<ProfileError> for AuthApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ListUsersError> for AuthApiError {
    fn from(error: ListUsersError) -> Self {
        AuthApiError::UnexpectedError(error.to_string())
    }
}

impl From<ForgotPasswordError> for AuthApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserNotFound => AuthApiError::EmailNotRegistered,
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<ResetPasswordError> for AuthApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidToken => AuthApiError::AuthenticationError(error.to_string()),
            e => AuthApiError::UnexpectedError(e.to_string()),
        }
    }
}

impl From<RefreshError> for AuthApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::UserStoreError(UserStoreError::UnexpectedError(e)) => {
                AuthApiError::UnexpectedError(e)
            }
            RefreshError::BannedTokenStoreError(e) => AuthApiError::UnexpectedError(e.to_string()),
            e => AuthApiError::AuthenticationError(e.to_string()),
        }
    }
}
