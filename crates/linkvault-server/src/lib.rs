//! # linkvault-server
//!
//! HTTP surface of Link Vault. Every route lives under `/api/v1`; all but
//! signup, signin and share resolution pass through the [`extract::AuthUser`] gate.

pub mod api;
pub mod error;
pub mod extract;

pub use api::create_router;

/// Default listen address when `LINKVAULT_BIND` is unset
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Environment variable overriding the listen address
pub const BIND_ENV: &str = "LINKVAULT_BIND";
