//! Tag matching — candidates whose tags intersect the user's interests.

use techtide_core::article::Article;
use techtide_core::error::StoreError;
use techtide_core::store::ArticleStore;

/// The most recent articles matching any of `interests`, up to `limit`.
///
/// An empty interest set matches nothing and performs no store read.
pub async fn match_by_interests(
    store: &dyn ArticleStore,
    interests: &[String],
    limit: usize,
) -> Result<Vec<Article>, StoreError> {
    if interests.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    let mut matches = store.find_by_tags(interests, limit).await?;
    matches.truncate(limit);
    Ok(matches)
}
