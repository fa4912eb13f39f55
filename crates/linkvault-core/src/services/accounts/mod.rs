//! Accounts module
//!
//! Credential store and signup/signin flow.
//!
//! ## Structure
//! - `repository.rs` - UserRepository trait and SQLite implementation
//! - `service.rs` - Business logic (testable, framework-independent)

pub mod repository;
pub mod service;


pub use repository::{NewUser, SqliteUserRepository, UserRepository};
pub use service::{
    current_user, delete_account, normalize_username, register, signin, signup,
    verify_credentials,
};
