pub mod middleware;
pub mod routes;

use gatehouse_application::AuthCore;

pub use middleware::{AuthenticatedUser, require_auth};
pub use routes::AuthApiError;

/// Shared state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub core: AuthCore,
    /// Echo reset tokens in the forgot-password response. Development only.
    pub expose_reset_tokens: bool,
}

impl AppState {
    pub fn new(core: AuthCore) -> Self {
        Self {
            core,
            expose_reset_tokens: false,
        }
    }

    pub fn exposing_reset_tokens(mut self, expose: bool) -> Self {
        self.expose_reset_tokens = expose;
        self
    }
}
