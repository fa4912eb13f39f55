//! Content module
//!
//! Owner-scoped storage of saved links.
//!
//! ## Structure
//! - `tags.rs` - Tag payload normalization
//! - `repository.rs` - ContentRepository trait and SQLite implementation
//! - `service.rs` - Business logic

pub mod repository;
pub mod service;
pub mod tags;


pub use repository::{ContentRepository, SqliteContentRepository};
pub use service::{create_content, delete_content, list_content, search_content, set_visibility};
pub use tags::{normalize_tags, RawTags};
