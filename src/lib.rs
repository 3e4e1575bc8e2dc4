//! # Gatehouse - Authentication Service Library
//!
//! This is a facade crate that re-exports all public APIs from the gatehouse components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, token claims
//! - **Port traits**: `UserStore`, `BannedTokenStore`, `ResetTokenStore`, `TokenCodec`, ...
//! - **Use cases**: `RegisterUseCase`, `LoginUseCase`, ... orchestrated by `AuthCore`
//! - **Adapters**: `PostgresUserStore`, `RedisBannedTokenStore`, `JwtTokenCodec`, etc.
//! - **Service**: `AuthService` - the axum router and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    AuthTokens, Clock, Email, IssuedToken, Password, PasswordHash, ResetToken, SystemClock,
    TokenClaims, TokenKind, User, UserError, UserProfile,
};

// ============================================================================
// Port Traits
// ============================================================================

pub use gatehouse_core::{
    BannedTokenStore, BannedTokenStoreError, EmailClient, HasherError, PasswordHasher,
    ResetTokenStore, ResetTokenStoreError, TokenCodec, TokenError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{AuthConfig, AuthCore, CoreError};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers and auth middleware
    pub mod http {
        pub use gatehouse_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// JWT codec
    pub mod tokens {
        pub use gatehouse_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

pub use gatehouse_adapters::{
    Argon2PasswordHasher, DashMapBannedTokenStore, HashMapResetTokenStore, HashMapUserStore,
    JwtConfig, JwtTokenCodec, MockEmailClient, PostgresBannedTokenStore, PostgresResetTokenStore,
    PostgresUserStore, PostmarkEmailClient, RedisBannedTokenStore,
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

pub use gatehouse_auth_service::{
    AuthService,
    helpers::{configure_banned_token_store, configure_postgresql, get_redis_client},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
