//! SQLite backend for the article pool and user data.
//!
//! One database file, three tables:
//! - `articles`  — the crawled pool, upserted by url
//! - `users`     — user accounts with interest tags (JSON text column)
//! - `user_logs` — append-only click log
//!
//! Tag matching uses `json_each` over the JSON-encoded tag column, so the
//! intersection query runs inside SQLite without any row post-filtering.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use techtide_core::article::{ActionLog, Article, Source};
use techtide_core::error::StoreError;
use techtide_core::store::{ArticleStore, UserStore};
use tracing::{debug, info};

/// A SQLite-backed store for articles, users, and click logs.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and run migrations.
    pub async fn new(path: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(path)
            .map_err(|e| StoreError::Storage(format!("Invalid SQLite path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("SQLite store initialized at {path}");
        Ok(store)
    }

    /// Create from an existing pool (useful for testing).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run schema migrations.
    async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                iid         INTEGER PRIMARY KEY AUTOINCREMENT,
                url         TEXT UNIQUE NOT NULL,
                title       TEXT NOT NULL,
                summary     TEXT NOT NULL DEFAULT '',
                tags        TEXT NOT NULL DEFAULT '[]',
                source      TEXT NOT NULL,
                top_image   TEXT,
                updated_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("articles table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_articles_updated_at ON articles(updated_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("updated_at index: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_articles_source ON articles(source, updated_at DESC)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("source index: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id     TEXT PRIMARY KEY,
                username    TEXT NOT NULL,
                interests   TEXT NOT NULL DEFAULT '[]',
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("users table: {e}")))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_logs (
                id             INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id        TEXT NOT NULL,
                article_title  TEXT NOT NULL,
                article_url    TEXT NOT NULL,
                action_type    TEXT NOT NULL,
                log_time       TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::MigrationFailed(format!("user_logs table: {e}")))?;

        debug!("SQLite migrations complete");
        Ok(())
    }

    /// Parse an `Article` from a SQLite row.
    fn row_to_article(row: &sqlx::sqlite::SqliteRow) -> Result<Article, StoreError> {
        let url: String = row
            .try_get("url")
            .map_err(|e| StoreError::QueryFailed(format!("url column: {e}")))?;
        let title: String = row
            .try_get("title")
            .map_err(|e| StoreError::QueryFailed(format!("title column: {e}")))?;
        let summary: String = row
            .try_get("summary")
            .map_err(|e| StoreError::QueryFailed(format!("summary column: {e}")))?;
        let tags_json: String = row
            .try_get("tags")
            .map_err(|e| StoreError::QueryFailed(format!("tags column: {e}")))?;
        let source_label: String = row
            .try_get("source")
            .map_err(|e| StoreError::QueryFailed(format!("source column: {e}")))?;
        let top_image: Option<String> = row
            .try_get("top_image")
            .map_err(|e| StoreError::QueryFailed(format!("top_image column: {e}")))?;
        let updated_at_str: String = row
            .try_get("updated_at")
            .map_err(|e| StoreError::QueryFailed(format!("updated_at column: {e}")))?;

        let tags: Vec<String> = serde_json::from_str(&tags_json).unwrap_or_default();

        let source = Source::parse(&source_label).ok_or_else(|| {
            StoreError::QueryFailed(format!("unknown source label: {source_label}"))
        })?;

        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(Article {
            url,
            title,
            summary,
            tags,
            source,
            top_image,
            updated_at,
        })
    }

    /// Insert or refresh one article, keyed by url.
    ///
    /// This is the crawler's door into the pool; the read-only
    /// `ArticleStore` trait deliberately does not expose it.
    pub async fn upsert_article(&self, article: &Article) -> Result<(), StoreError> {
        let tags_json = serde_json::to_string(&article.tags)
            .map_err(|e| StoreError::Storage(format!("tags encoding: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO articles (url, title, summary, tags, source, top_image, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(url) DO UPDATE SET
                title = excluded.title,
                summary = excluded.summary,
                tags = excluded.tags,
                source = excluded.source,
                top_image = excluded.top_image,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&article.url)
        .bind(&article.title)
        .bind(&article.summary)
        .bind(&tags_json)
        .bind(article.source.label())
        .bind(&article.top_image)
        .bind(article.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("article upsert: {e}")))?;

        Ok(())
    }

    /// Create or update a user account with its interest tags.
    pub async fn upsert_user(
        &self,
        user_id: &str,
        username: &str,
        interests: &[String],
    ) -> Result<(), StoreError> {
        let interests_json = serde_json::to_string(interests)
            .map_err(|e| StoreError::Storage(format!("interests encoding: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, interests, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                username = excluded.username,
                interests = excluded.interests
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(&interests_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("user upsert: {e}")))?;

        Ok(())
    }

    /// Total number of articles in the pool.
    pub async fn article_count(&self) -> Result<usize, StoreError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM articles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("article count: {e}")))?;
        let n: i64 = row
            .try_get("n")
            .map_err(|e| StoreError::QueryFailed(format!("count column: {e}")))?;
        Ok(n as usize)
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find_by_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let wanted = serde_json::to_string(tags)
            .map_err(|e| StoreError::QueryFailed(format!("tags encoding: {e}")))?;

        let rows = sqlx::query(
            r#"
            SELECT url, title, summary, tags, source, top_image, updated_at
            FROM articles
            WHERE EXISTS (
                SELECT 1 FROM json_each(articles.tags)
                WHERE json_each.value IN (SELECT value FROM json_each(?))
            )
            ORDER BY updated_at DESC, iid DESC
            LIMIT ?
            "#,
        )
        .bind(&wanted)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("find_by_tags: {e}")))?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn find_by_source(
        &self,
        source: Source,
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT url, title, summary, tags, source, top_image, updated_at
            FROM articles
            WHERE source = ?
            ORDER BY updated_at DESC, iid DESC
            LIMIT ?
            "#,
        )
        .bind(source.label())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("find_by_source: {e}")))?;

        rows.iter().map(Self::row_to_article).collect()
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Article>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT url, title, summary, tags, source, top_image, updated_at
            FROM articles
            ORDER BY updated_at DESC, iid DESC
            LIMIT ?
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::QueryFailed(format!("find_recent: {e}")))?;

        rows.iter().map(Self::row_to_article).collect()
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn interests(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        let row = sqlx::query("SELECT interests FROM users WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::QueryFailed(format!("interests lookup: {e}")))?;

        let Some(row) = row else {
            return Ok(Vec::new());
        };

        let interests_json: String = row
            .try_get("interests")
            .map_err(|e| StoreError::QueryFailed(format!("interests column: {e}")))?;

        Ok(serde_json::from_str(&interests_json).unwrap_or_default())
    }

    async fn record_action(&self, log: ActionLog) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_logs (user_id, article_title, article_url, action_type, log_time)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.user_id)
        .bind(&log.title)
        .bind(&log.url)
        .bind(&log.action)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Storage(format!("action log insert: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
        let path = dir.path().join("test.db");
        SqliteStore::new(path.to_str().unwrap()).await.unwrap()
    }

    fn article(url: &str, source: Source, tags: &[&str], age_mins: i64) -> Article {
        Article {
            url: url.into(),
            title: format!("Title for {url}"),
            summary: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            source,
            top_image: None,
            updated_at: Utc::now() - Duration::minutes(age_mins),
        }
    }

    #[tokio::test]
    async fn upsert_and_find_recent() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert_article(&article("https://a.example/1", Source::Juejin, &[], 10))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://a.example/2", Source::HackerNews, &[], 1))
            .await
            .unwrap();

        let recent = store.find_recent(10).await.unwrap();
        assert_eq!(recent.len(), 2);
        // newest first
        assert_eq!(recent[0].url, "https://a.example/2");
        assert_eq!(recent[1].url, "https://a.example/1");
    }

    #[tokio::test]
    async fn upsert_is_keyed_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert_article(&article("https://a.example/1", Source::Juejin, &["Rust"], 10))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://a.example/1", Source::Juejin, &["Go"], 1))
            .await
            .unwrap();

        assert_eq!(store.article_count().await.unwrap(), 1);
        let recent = store.find_recent(10).await.unwrap();
        assert_eq!(recent[0].tags, vec!["Go".to_string()]);
    }

    #[tokio::test]
    async fn find_by_tags_intersects() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert_article(&article("https://a.example/py", Source::Juejin, &["Python"], 5))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://a.example/rs", Source::Juejin, &["Rust"], 3))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://a.example/none", Source::HackerNews, &[], 1))
            .await
            .unwrap();

        let hits = store
            .find_by_tags(&["Python".into(), "Rust".into()], 10)
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://a.example/rs");

        let empty = store.find_by_tags(&[], 10).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn find_by_source_filters() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert_article(&article("https://a.example/1", Source::Juejin, &[], 5))
            .await
            .unwrap();
        store
            .upsert_article(&article("https://a.example/2", Source::GithubTrending, &[], 3))
            .await
            .unwrap();

        let hits = store.find_by_source(Source::GithubTrending, 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].source, Source::GithubTrending);
    }

    #[tokio::test]
    async fn limits_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        for i in 0..5 {
            store
                .upsert_article(&article(
                    &format!("https://a.example/{i}"),
                    Source::Juejin,
                    &[],
                    i,
                ))
                .await
                .unwrap();
        }

        assert_eq!(store.find_recent(3).await.unwrap().len(), 3);
        assert_eq!(
            store.find_by_source(Source::Juejin, 2).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn user_interests_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .upsert_user("user_001", "alex", &["Rust".into(), "AI".into()])
            .await
            .unwrap();

        let interests = store.interests("user_001").await.unwrap();
        assert_eq!(interests, vec!["Rust".to_string(), "AI".to_string()]);

        // unknown users simply have no interests
        assert!(store.interests("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn record_action_appends() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir).await;

        store
            .record_action(ActionLog::like("user_001", "A title", "https://a.example/1"))
            .await
            .unwrap();
        store
            .record_action(ActionLog::like("user_001", "A title", "https://a.example/1"))
            .await
            .unwrap();

        let row = sqlx::query("SELECT COUNT(*) AS n FROM user_logs")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        let n: i64 = row.try_get("n").unwrap();
        assert_eq!(n, 2);
    }
}
