//! # linkvault-core
//!
//! Core logic for Link Vault - shared between the CLI and the HTTP server.
//!
//! This crate provides:
//! - Database operations (`db` module)
//! - Data models (`models` module)
//! - Accounts, content and share links (`services` module)
//! - Password hashing, identity tokens and the request gate (`auth` module)
//! - Token configuration from the environment (`config` module)
//! - Unified error handling (`error` module)

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

// Re-exports for convenience
pub use auth::{AuthGate, Identity, TokenService};
pub use config::TokenConfig;
pub use db::Database;
pub use error::{AuthFailure, Error, Result, Status};

// Re-export commonly used types from models
pub use models::{
    ApiResponse, AuthResponse, ContentItem, ContentType, CreateContent, ShareGrant, SharedItem,
    SharedVault, SigninRequest, SignupRequest, User, UserResponse,
};

// Re-export commonly used types from services
pub use services::{
    ContentRepository, RawTags, ShareLinkRepository, SqliteContentRepository,
    SqliteShareLinkRepository, SqliteUserRepository, UserRepository, VaultServices,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the library version
pub fn version() -> &'static str {
    VERSION
}
