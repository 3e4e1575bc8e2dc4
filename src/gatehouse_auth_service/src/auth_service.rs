use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use gatehouse_adapters::{
    config::AllowedOrigins,
    http::{
        AppState, require_auth,
        routes::{
            forgot_password, health, login, logout, me, refresh, register, reset_password, users,
        },
    },
};
use gatehouse_application::AuthCore;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main authentication service that provides all auth-related routes
pub struct AuthService {
    router: Router,
}

impl AuthService {
    /// Create a new AuthService over the given core.
    ///
    /// Reset tokens are never echoed back; see [`AuthService::with_state`].
    pub fn new(core: AuthCore) -> Self {
        Self::with_state(AppState::new(core))
    }

    /// Create a new AuthService from prepared route state
    ///
    /// # Note on Architecture
    /// Every route shares one [`AppState`]. `/logout`, `/me` and `/users`
    /// sit behind [`require_auth`], which resolves the bearer token before
    /// the handler runs.
    pub fn with_state(state: AppState) -> Self {
        let protected = Router::new()
            .route("/logout", post(logout))
            .route("/me", get(me))
            .route("/users", get(users))
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

        let router = Router::new()
            .route("/register", post(register))
            .route("/login", post(login))
            .route("/refresh", post(refresh))
            .route("/forgot-password", post(forgot_password))
            .route("/reset-password", post(reset_password))
            .route("/health", get(health))
            .merge(protected)
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a nested router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional CORS allow-list; an empty list allows any origin
    ///
    /// # Returns
    /// An Axum Router that can be nested into another application
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let allow_origin = if allowed_origins.is_any() {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(allowed_origins.header_values())
            };

            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_origin(allow_origin);

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional CORS allow-list
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
