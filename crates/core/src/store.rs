//! Store traits — the abstraction over persistence backends.
//!
//! `ArticleStore` is the read side of the crawled-article pool. The
//! recommendation pipeline only ever reads; ingestion (the crawler's upsert
//! path) is an inherent method on concrete stores, deliberately outside this
//! trait. `UserStore` covers interest tags and the click log.
//!
//! Implementations: SQLite, in-memory (for testing).

use async_trait::async_trait;

use crate::article::{ActionLog, Article, Source};
use crate::error::StoreError;

/// Read-only queries over the article pool.
///
/// All queries return articles ordered by `updated_at` descending.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// The backend name (e.g., "sqlite", "in_memory").
    fn name(&self) -> &str;

    /// Articles whose tag set intersects `tags`, most recent first.
    async fn find_by_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> std::result::Result<Vec<Article>, StoreError>;

    /// The most recent articles from one source.
    async fn find_by_source(
        &self,
        source: Source,
        limit: usize,
    ) -> std::result::Result<Vec<Article>, StoreError>;

    /// The most recent articles across all sources.
    async fn find_recent(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<Article>, StoreError>;
}

/// User-facing persistence: interest tags and the click log.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// The interest tags the user has subscribed to. Unknown users have none.
    async fn interests(
        &self,
        user_id: &str,
    ) -> std::result::Result<Vec<String>, StoreError>;

    /// Append one click-log entry.
    async fn record_action(&self, log: ActionLog) -> std::result::Result<(), StoreError>;
}
