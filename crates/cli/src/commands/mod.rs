//! CLI subcommands.

pub mod highlights;
pub mod recommend;
pub mod seed;
pub mod serve;

use std::sync::Arc;
use std::time::Duration;

use techtide_config::AppConfig;
use techtide_core::store::ArticleStore;
use techtide_recommend::{RecommendSettings, Recommender};
use techtide_store::SqliteStore;

/// Everything a subcommand needs: config, store, and pipeline.
pub(crate) struct Context {
    pub config: AppConfig,
    pub store: Arc<SqliteStore>,
    pub recommender: Arc<Recommender>,
}

/// Load config, open the store, and wire up the pipeline.
pub(crate) async fn build_context() -> anyhow::Result<Context> {
    let config = AppConfig::load()?;
    let store = Arc::new(SqliteStore::new(&config.store.path).await?);
    let llm = techtide_llm::client_from_config(&config.llm);

    let settings = RecommendSettings {
        limit: config.recommend.limit,
        highlight_limit: config.recommend.highlight_limit,
        temperature: config.llm.temperature,
        max_tokens: config.llm.max_tokens,
        llm_timeout: Duration::from_secs(config.llm.timeout_secs),
    };

    let articles: Arc<dyn ArticleStore> = store.clone();
    let recommender = Arc::new(Recommender::new(articles, llm).with_settings(settings));

    Ok(Context {
        config,
        store,
        recommender,
    })
}
