//! Multi-source interleaving — a diverse fill-in candidate set.
//!
//! Tag matching alone cannot guarantee a full candidate set, so the fill
//! path pulls from every source: a round-robin head keeps source diversity,
//! a k-way recency merge drains the per-source pools, and a global recency
//! pass tops up whatever is still missing.

use std::collections::{HashSet, VecDeque};

use techtide_core::article::{Article, Source};
use techtide_core::error::StoreError;
use techtide_core::store::ArticleStore;

/// Per-source fetch quota for the interleaved fill.
pub const PER_SOURCE_QUOTA: usize = 5;

/// Build a deduplicated, source-diverse candidate fill of at most `limit`.
///
/// Deterministic given store contents:
/// 1. Each source contributes its `PER_SOURCE_QUOTA` most recent articles.
/// 2. Head: one article per non-empty source, in source priority order.
/// 3. Remainder: k-way merge over the per-source queues — always the most
///    recent head; equal timestamps resolve toward higher source priority.
/// 4. Still short: append unseen urls from a `2 * limit` global recency
///    pool until `limit` or exhaustion.
pub async fn diversified_fill(
    store: &dyn ArticleStore,
    limit: usize,
) -> Result<Vec<Article>, StoreError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    // Per-source pools, each already recency-descending.
    let mut pools: Vec<VecDeque<Article>> = Vec::with_capacity(Source::PRIORITY.len());
    for source in Source::PRIORITY {
        pools.push(store.find_by_source(source, PER_SOURCE_QUOTA).await?.into());
    }

    let mut picked: Vec<Article> = Vec::with_capacity(limit);
    let mut seen: HashSet<String> = HashSet::new();

    // Round-robin head: the single most recent article of each non-empty
    // pool, in source priority order.
    for pool in &mut pools {
        if picked.len() == limit {
            break;
        }
        while let Some(article) = pool.pop_front() {
            if seen.insert(article.url.clone()) {
                picked.push(article);
                break;
            }
        }
    }

    // Drain the remainders by recency.
    while picked.len() < limit {
        let Some(next) = pop_most_recent(&mut pools) else {
            break;
        };
        if seen.insert(next.url.clone()) {
            picked.push(next);
        }
    }

    // Global fill when the per-source quotas cannot reach the limit.
    if picked.len() < limit {
        for article in store.find_recent(limit * 2).await? {
            if picked.len() == limit {
                break;
            }
            if seen.insert(article.url.clone()) {
                picked.push(article);
            }
        }
    }

    Ok(picked)
}

/// Pop the front article with the greatest `updated_at` across all queues.
/// Equal timestamps resolve toward the lower source priority index.
fn pop_most_recent(pools: &mut [VecDeque<Article>]) -> Option<Article> {
    let (index, _) = pools
        .iter()
        .enumerate()
        .filter_map(|(i, pool)| pool.front().map(|article| (i, article.updated_at)))
        .max_by(|(ia, ta), (ib, tb)| ta.cmp(tb).then_with(|| ib.cmp(ia)))?;
    pools[index].pop_front()
}
