//! `techtide seed` — load demo articles and users into the store.
//!
//! Handy for trying the service without a crawler run. Re-running is safe:
//! everything is upserted by its natural key.

use chrono::{Duration, Utc};
use techtide_core::article::{Article, Source};
use tracing::info;

pub async fn run() -> anyhow::Result<()> {
    let ctx = super::build_context().await?;
    let now = Utc::now();

    let articles = [
        Article {
            url: "https://juejin.cn/post/7301".into(),
            title: "Async Rust patterns that actually scale".into(),
            summary: "A tour of task orchestration patterns in production services.".into(),
            tags: vec!["Rust".into(), "Backend".into()],
            source: Source::Juejin,
            top_image: None,
            updated_at: now - Duration::minutes(5),
        },
        Article {
            url: "https://juejin.cn/post/7302".into(),
            title: "What's new in the Python 3.14 interpreter".into(),
            summary: "Faster startup, better error messages.".into(),
            tags: vec!["Python".into()],
            source: Source::Juejin,
            top_image: None,
            updated_at: now - Duration::minutes(45),
        },
        Article {
            url: "https://example.com/hn/llm-inference".into(),
            title: "Show HN: Single-binary LLM inference server".into(),
            summary: String::new(),
            tags: vec!["AI".into(), "LLM".into()],
            source: Source::HackerNews,
            top_image: None,
            updated_at: now - Duration::minutes(12),
        },
        Article {
            url: "https://example.com/hn/postgres-18".into(),
            title: "PostgreSQL 18 released".into(),
            summary: String::new(),
            tags: vec!["Database".into()],
            source: Source::HackerNews,
            top_image: None,
            updated_at: now - Duration::minutes(90),
        },
        Article {
            url: "https://github.com/sharkdp/hyperfine".into(),
            title: "sharkdp/hyperfine".into(),
            summary: "A command-line benchmarking tool.".into(),
            tags: vec!["GitHub".into(), "Trending".into()],
            source: Source::GithubTrending,
            top_image: None,
            updated_at: now - Duration::minutes(30),
        },
    ];

    for article in &articles {
        ctx.store.upsert_article(article).await?;
    }

    ctx.store
        .upsert_user(
            "user_001",
            "demo",
            &["Rust".to_string(), "AI".to_string()],
        )
        .await?;

    info!(
        articles = articles.len(),
        "seeded demo data into {}", ctx.config.store.path
    );
    println!("Seeded {} articles and user_001 (interests: Rust, AI).", articles.len());
    Ok(())
}
