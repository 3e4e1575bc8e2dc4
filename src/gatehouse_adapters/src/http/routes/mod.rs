pub mod error;
pub mod forgot_password;
pub mod health;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;
pub mod register;
pub mod reset_password;
pub mod users;

pub use error::{AuthApiError, ErrorResponse};
pub use forgot_password::{ForgotPasswordRequest, ForgotPasswordResponse, forgot_password};
pub use health::{HealthResponse, health};
pub use login::login;
pub use logout::{LogoutRequest, logout};
pub use me::me;
pub use refresh::{RefreshRequest, TokenPairResponse, refresh};
pub use register::{AuthResponse, register};
pub use reset_password::{MessageResponse, reset_password};
pub use users::users;
