//! Storage backends for techtide.
//!
//! All backends implement the read-only `techtide_core::ArticleStore` trait
//! (and `UserStore` where user data applies). Ingestion — the crawler's
//! upsert path — is exposed as inherent methods on the concrete stores only.

pub mod in_memory;
pub mod sqlite;

pub use in_memory::{InMemoryArticleStore, InMemoryUserStore};
pub use sqlite::SqliteStore;
