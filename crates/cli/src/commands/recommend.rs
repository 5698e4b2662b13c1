//! `techtide recommend` — one recommendation request from the terminal.

use techtide_core::profile::UserProfile;
use techtide_core::store::UserStore;

pub async fn run(user: &str, tags: Vec<String>, limit: Option<usize>) -> anyhow::Result<()> {
    let ctx = super::build_context().await?;

    let interests = if tags.is_empty() {
        ctx.store.interests(user).await?
    } else {
        tags
    };
    let profile = UserProfile::new(interests);

    let recommendation = match limit {
        Some(limit) if limit > 0 => ctx.recommender.recommend(&profile, limit).await,
        _ => ctx.recommender.recommend_default(&profile).await,
    };

    if let Some(diagnostic) = &recommendation.diagnostic {
        eprintln!("note: {diagnostic}");
    }

    if recommendation.items.is_empty() {
        println!("Nothing to recommend — is the article pool seeded?");
        return Ok(());
    }

    for (i, item) in recommendation.items.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, item.title, item.source);
        println!("   {} — {}", item.tag_match, item.ai_comment);
        println!("   {}", item.url);
    }

    Ok(())
}
