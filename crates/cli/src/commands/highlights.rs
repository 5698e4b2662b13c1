//! `techtide highlights` — print the daily highlights teaser.

pub async fn run() -> anyhow::Result<()> {
    let ctx = super::build_context().await?;
    println!("{}", ctx.recommender.daily_highlights().await);
    Ok(())
}
