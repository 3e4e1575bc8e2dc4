pub mod clock;
pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use clock::{Clock, SystemClock};

pub use domain::{
    email::Email,
    password::{Password, PasswordHash},
    reset_token::{PasswordResetRequest, ResetToken},
    token::{AuthTokens, IssuedToken, TokenClaims, TokenKind},
    user::{DisplayName, User, UserError, UserName, UserProfile},
};

pub use ports::{
    repositories::{
        BannedTokenStore, BannedTokenStoreError, ResetTokenStore, ResetTokenStoreError, UserStore,
        UserStoreError,
    },
    services::{EmailClient, HasherError, PasswordHasher, TokenCodec, TokenError},
};
