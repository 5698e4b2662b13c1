//! Reconciliation — one output item per candidate, in candidate order.
//!
//! The model's `index` values are the only link back onto the snapshot.
//! Whatever the model returned (or failed to return), the output is exactly
//! N items with non-empty `ai_comment` and `tag_match`.

use std::collections::HashMap;

use techtide_core::article::{Article, RecommendationItem};

use crate::parse::Annotation;
use crate::prompt::HOT_PICK;

/// Default comment when the model said nothing usable about a candidate.
fn default_comment(article: &Article) -> String {
    format!("Trending now on {}", article.source.label())
}

/// The tag credited when the model supplied none: the first candidate tag
/// the user subscribed to, else the hot-pick sentinel.
fn fallback_tag_match(article: &Article, interests: &[String]) -> String {
    article
        .first_matching_tag(interests)
        .map(String::from)
        .unwrap_or_else(|| HOT_PICK.to_string())
}

/// Merge annotations onto candidates by positional index.
///
/// Always yields exactly one item per candidate, in candidate order — the
/// model's output order never matters here, only its `index` values.
pub fn reconcile(
    candidates: &[Article],
    annotations: &[Annotation],
    interests: &[String],
) -> Vec<RecommendationItem> {
    // The parser already de-duplicates, but the first-wins policy is held
    // here as well.
    let mut by_index: HashMap<usize, &Annotation> = HashMap::with_capacity(annotations.len());
    for annotation in annotations {
        by_index.entry(annotation.index).or_insert(annotation);
    }

    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let annotation = by_index.get(&(i + 1));

            let ai_comment = annotation
                .map(|a| a.comment.trim())
                .filter(|comment| !comment.is_empty())
                .map(String::from)
                .unwrap_or_else(|| default_comment(candidate));

            let tag_match = annotation
                .and_then(|a| a.tag_match.as_deref())
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .unwrap_or_else(|| fallback_tag_match(candidate, interests));

            RecommendationItem {
                title: candidate.title.clone(),
                url: candidate.url.clone(),
                summary: candidate.summary.clone(),
                top_image: candidate.top_image.clone(),
                source: candidate.source,
                ai_comment,
                tag_match,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use techtide_core::article::Source;

    fn article(url: &str, source: Source, tags: &[&str]) -> Article {
        Article {
            url: url.into(),
            title: format!("Title for {url}"),
            summary: "A summary".into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            source,
            top_image: None,
            updated_at: Utc::now(),
        }
    }

    fn annotation(index: usize, comment: &str, tag_match: Option<&str>) -> Annotation {
        Annotation {
            index,
            comment: comment.into(),
            tag_match: tag_match.map(String::from),
        }
    }

    #[test]
    fn partial_annotations_fall_back_per_candidate() {
        // The worked example: the model only annotated the second candidate.
        let candidates = vec![
            article("https://a.example/A", Source::Juejin, &["Python"]),
            article("https://a.example/B", Source::HackerNews, &["Java"]),
        ];
        let interests = vec!["Python".to_string()];
        let annotations = vec![annotation(2, "nice", Some("Java"))];

        let items = reconcile(&candidates, &annotations, &interests);
        assert_eq!(items.len(), 2);

        // A: defaulted comment, tag computed from the interest intersection
        assert_eq!(items[0].ai_comment, "Trending now on Juejin");
        assert_eq!(items[0].tag_match, "Python");

        // B: the model's annotation verbatim
        assert_eq!(items[1].ai_comment, "nice");
        assert_eq!(items[1].tag_match, "Java");
    }

    #[test]
    fn no_annotations_yield_all_defaults() {
        let candidates = vec![
            article("https://a.example/1", Source::Juejin, &[]),
            article("https://a.example/2", Source::GithubTrending, &[]),
        ];
        let items = reconcile(&candidates, &[], &[]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].ai_comment, "Trending now on Juejin");
        assert_eq!(items[1].ai_comment, "Trending now on GitHub Trending");
        assert!(items.iter().all(|item| item.tag_match == HOT_PICK));
    }

    #[test]
    fn annotation_order_does_not_reorder_items() {
        let candidates = vec![
            article("https://a.example/1", Source::Juejin, &[]),
            article("https://a.example/2", Source::Juejin, &[]),
            article("https://a.example/3", Source::Juejin, &[]),
        ];
        let annotations = vec![
            annotation(3, "third", None),
            annotation(1, "first", None),
            annotation(2, "second", None),
        ];

        let items = reconcile(&candidates, &annotations, &[]);
        assert_eq!(items[0].ai_comment, "first");
        assert_eq!(items[1].ai_comment, "second");
        assert_eq!(items[2].ai_comment, "third");
    }

    #[test]
    fn blank_comment_and_tag_are_defaulted() {
        let candidates = vec![article("https://a.example/1", Source::HackerNews, &["AI"])];
        let annotations = vec![annotation(1, "   ", Some("  "))];

        let items = reconcile(&candidates, &annotations, &["AI".to_string()]);
        assert_eq!(items[0].ai_comment, "Trending now on Hacker News");
        assert_eq!(items[0].tag_match, "AI");
    }

    #[test]
    fn output_always_matches_candidate_count() {
        let candidates: Vec<Article> = (0..5)
            .map(|i| article(&format!("https://a.example/{i}"), Source::Juejin, &[]))
            .collect();
        // over-annotated: some indices missing, nothing breaks
        let annotations = vec![annotation(2, "two", None), annotation(5, "five", None)];

        let items = reconcile(&candidates, &annotations, &[]);
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|item| !item.ai_comment.is_empty()));
        assert!(items.iter().all(|item| !item.tag_match.is_empty()));
    }

    #[test]
    fn candidate_metadata_is_carried_through() {
        let mut candidate = article("https://a.example/1", Source::Juejin, &[]);
        candidate.top_image = Some("https://a.example/1.png".into());
        let items = reconcile(&[candidate], &[], &[]);

        assert_eq!(items[0].title, "Title for https://a.example/1");
        assert_eq!(items[0].summary, "A summary");
        assert_eq!(items[0].top_image.as_deref(), Some("https://a.example/1.png"));
        assert_eq!(items[0].source, Source::Juejin);
    }
}
