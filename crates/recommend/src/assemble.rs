//! Candidate assembly — the snapshot one request operates on.
//!
//! Tag matches come first, the interleaved fill covers the rest. A store
//! failure mid-assembly degrades to whatever was collected so far; an empty
//! result is the caller's signal to short-circuit the request.

use std::collections::HashSet;

use techtide_core::article::Article;
use techtide_core::store::ArticleStore;
use tracing::warn;

use crate::interleave::diversified_fill;
use crate::matcher::match_by_interests;

/// Assemble at most `limit` candidates for one request.
///
/// The result carries no duplicate urls and preserves ordering: tag matches
/// (recency descending) before interleaved fill. Infallible by design —
/// store errors are logged and shrink the set instead of failing the
/// request.
pub async fn assemble(
    store: &dyn ArticleStore,
    interests: &[String],
    limit: usize,
) -> Vec<Article> {
    let mut candidates: Vec<Article> = Vec::with_capacity(limit);
    let mut seen: HashSet<String> = HashSet::new();

    match match_by_interests(store, interests, limit).await {
        Ok(matches) => {
            for article in matches {
                if candidates.len() == limit {
                    break;
                }
                if seen.insert(article.url.clone()) {
                    candidates.push(article);
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "tag-match query failed; continuing with interleaved fill");
        }
    }

    if candidates.len() < limit {
        match diversified_fill(store, limit).await {
            Ok(fill) => {
                for article in fill {
                    if candidates.len() == limit {
                        break;
                    }
                    if seen.insert(article.url.clone()) {
                        candidates.push(article);
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "interleaved fill failed; keeping what was collected");
            }
        }
    }

    candidates
}
