//! Business logic services
//!
//! - `accounts`: credential store, signup/signin, account deletion
//! - `content`: owner-scoped saved links and tag normalization
//! - `sharing`: public share links

pub mod accounts;
pub mod content;
pub mod sharing;

#[cfg(test)]
pub(crate) mod mock;

use crate::auth::{AuthGate, TokenService};
use crate::db::Database;

pub use accounts::{SqliteUserRepository, UserRepository};
pub use content::{ContentRepository, RawTags, SqliteContentRepository};
pub use sharing::{ShareLinkRepository, SqliteShareLinkRepository};

/// SQLite-backed repositories plus the auth gate, shared by every request
#[derive(Clone)]
pub struct VaultServices {
    pub users: SqliteUserRepository,
    pub contents: SqliteContentRepository,
    pub shares: SqliteShareLinkRepository,
    pub gate: AuthGate,
}

impl VaultServices {
    pub fn new(db: &Database, tokens: TokenService) -> Self {
        Self {
            users: SqliteUserRepository::new(db.pool.clone()),
            contents: SqliteContentRepository::new(db.pool.clone()),
            shares: SqliteShareLinkRepository::new(db.pool.clone()),
            gate: AuthGate::new(tokens),
        }
    }

    pub fn tokens(&self) -> &TokenService {
        self.gate.tokens()
    }
}
