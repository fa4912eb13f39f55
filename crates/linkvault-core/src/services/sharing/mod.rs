//! Sharing module
//!
//! Public capability links onto a user's vault.
//!
//! ## Structure
//! - `repository.rs` - ShareLinkRepository trait and SQLite implementation
//! - `service.rs` - Enable / disable / resolve

pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{ShareLinkRepository, SqliteShareLinkRepository};
pub use service::{
    disable_sharing, enable_sharing, generate_share_hash, resolve_share, SHARE_HASH_LEN,
};
