pub mod auth_core;
pub mod config;
pub mod identity;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use auth_core::{
    AuthCore, CoreError, LoginRequest, RegisterRequest, ResetPasswordRequest, SignedIn,
    ValidationError,
};
pub use config::AuthConfig;
pub use identity::{IdentityLookup, LookupError};
pub use use_cases::{
    authenticate::{AuthenticateError, AuthenticateUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    get_profile::{GetProfileUseCase, ProfileError},
    list_users::{ListUsersError, ListUsersUseCase},
    login::{LoginError, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    refresh::{RefreshError, RefreshUseCase},
    register::{NewUser, RegisterError, RegisterUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
};
