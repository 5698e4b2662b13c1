//! In-memory stores — useful for testing and ephemeral runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use techtide_core::article::{ActionLog, Article, Source};
use techtide_core::error::StoreError;
use techtide_core::store::{ArticleStore, UserStore};
use tokio::sync::RwLock;

/// An article pool kept in a Vec.
///
/// Query results mirror the SQLite backend: recency descending, stable on
/// ties (insertion order).
pub struct InMemoryArticleStore {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self {
            articles: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Insert or replace one article, keyed by url.
    pub async fn upsert(&self, article: Article) {
        let mut articles = self.articles.write().await;
        articles.retain(|a| a.url != article.url);
        articles.push(article);
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    async fn sorted_filtered<F>(&self, keep: F, limit: usize) -> Vec<Article>
    where
        F: Fn(&Article) -> bool,
    {
        let articles = self.articles.read().await;
        let mut hits: Vec<Article> = articles.iter().filter(|a| keep(a)).cloned().collect();
        hits.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        hits.truncate(limit);
        hits
    }
}

impl Default for InMemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleStore for InMemoryArticleStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn find_by_tags(
        &self,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.sorted_filtered(|a| a.has_any_tag(tags), limit).await)
    }

    async fn find_by_source(
        &self,
        source: Source,
        limit: usize,
    ) -> Result<Vec<Article>, StoreError> {
        Ok(self.sorted_filtered(|a| a.source == source, limit).await)
    }

    async fn find_recent(&self, limit: usize) -> Result<Vec<Article>, StoreError> {
        Ok(self.sorted_filtered(|_| true, limit).await)
    }
}

/// In-memory user data: interest tags plus the recorded click log.
pub struct InMemoryUserStore {
    interests: Arc<RwLock<HashMap<String, Vec<String>>>>,
    logs: Arc<RwLock<Vec<ActionLog>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            interests: Arc::new(RwLock::new(HashMap::new())),
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_interests(&self, user_id: &str, interests: Vec<String>) {
        self.interests
            .write()
            .await
            .insert(user_id.to_string(), interests);
    }

    /// Snapshot of everything recorded so far (test inspection).
    pub async fn recorded(&self) -> Vec<ActionLog> {
        self.logs.read().await.clone()
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn interests(&self, user_id: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .interests
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn record_action(&self, log: ActionLog) -> Result<(), StoreError> {
        self.logs.write().await.push(log);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

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
    async fn upsert_replaces_by_url() {
        let store = InMemoryArticleStore::new();
        store
            .upsert(article("https://a.example/1", Source::Juejin, &["Rust"], 10))
            .await;
        store
            .upsert(article("https://a.example/1", Source::Juejin, &["Go"], 1))
            .await;

        assert_eq!(store.len().await, 1);
        let recent = store.find_recent(10).await.unwrap();
        assert_eq!(recent[0].tags, vec!["Go".to_string()]);
    }

    #[tokio::test]
    async fn queries_order_by_recency() {
        let store = InMemoryArticleStore::new();
        store
            .upsert(article("https://a.example/old", Source::Juejin, &["Rust"], 60))
            .await;
        store
            .upsert(article("https://a.example/new", Source::Juejin, &["Rust"], 1))
            .await;

        let by_tag = store.find_by_tags(&["Rust".into()], 10).await.unwrap();
        assert_eq!(by_tag[0].url, "https://a.example/new");

        let by_source = store.find_by_source(Source::Juejin, 1).await.unwrap();
        assert_eq!(by_source.len(), 1);
        assert_eq!(by_source[0].url, "https://a.example/new");
    }

    #[tokio::test]
    async fn empty_tag_query_matches_nothing() {
        let store = InMemoryArticleStore::new();
        store
            .upsert(article("https://a.example/1", Source::Juejin, &["Rust"], 1))
            .await;
        assert!(store.find_by_tags(&[], 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn user_store_roundtrip() {
        let users = InMemoryUserStore::new();
        users
            .set_interests("user_001", vec!["Rust".into()])
            .await;

        assert_eq!(
            users.interests("user_001").await.unwrap(),
            vec!["Rust".to_string()]
        );
        assert!(users.interests("nobody").await.unwrap().is_empty());

        users
            .record_action(ActionLog::like("user_001", "T", "https://a.example/1"))
            .await
            .unwrap();
        assert_eq!(users.recorded().await.len(), 1);
    }
}
