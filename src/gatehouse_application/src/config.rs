use chrono::Duration;

/// Settings the auth core needs at runtime. Built once by the service from
/// its loaded settings and passed to [`crate::AuthCore::new`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// How long a password reset token stays valid.
    pub reset_token_ttl: Duration,
    /// Link sent in the reset email; the token is appended as `?token=`.
    pub reset_url_base: String,
    /// When set, unknown users are reported exactly like bad credentials
    /// and forgot-password succeeds without sending anything.
    pub conceal_unknown_users: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reset_token_ttl: Duration::hours(1),
            reset_url_base: "http://localhost:3000/reset-password".to_string(),
            conceal_unknown_users: false,
        }
    }
}
