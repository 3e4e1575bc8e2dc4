pub mod auth_service;
pub mod helpers;
pub mod tracing;

pub use auth_service::AuthService;
