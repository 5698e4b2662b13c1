//! Prompt construction — the candidate snapshot as an instruction payload.
//!
//! Every candidate is labeled with a 1-based positional identifier. The
//! identifier is the only thing reconciliation trusts later; the requested
//! output ordering is advisory.

use techtide_core::article::Article;

/// System persona for the annotation call.
pub const SYSTEM_PERSONA: &str =
    "You are a tech recommendation engine. Output strictly valid JSON.";

/// System persona for the daily highlights teaser.
pub const HIGHLIGHTS_PERSONA: &str =
    "You are a tech news editor writing one catchy daily teaser sentence.";

/// Sentinel `tag_match` value when no interest tag applies.
pub const HOT_PICK: &str = "hot pick";

/// Serialize the candidate snapshot plus the annotation instructions.
pub fn build_prompt(candidates: &[Article], interests: &[String]) -> String {
    let mut out = String::from("Candidate articles:\n\n");

    for (i, candidate) in candidates.iter().enumerate() {
        let summary = if candidate.summary.trim().is_empty() {
            "(no summary)"
        } else {
            candidate.summary.trim()
        };
        let tags = if candidate.tags.is_empty() {
            "none".to_string()
        } else {
            candidate.tags.join(", ")
        };

        out.push_str(&format!(
            "[{index}]\ntitle: {title}\nsummary: {summary}\ntags: {tags}\nurl: {url}\n\n",
            index = i + 1,
            title = candidate.title,
            url = candidate.url,
        ));
    }

    let interests = if interests.is_empty() {
        "none".to_string()
    } else {
        interests.join(", ")
    };
    out.push_str(&format!("Reader interests: {interests}\n\n"));

    out.push_str(
        "Return strictly a JSON array with one object per article, fields:\n\
         - \"index\": the article identifier shown in brackets above\n\
         - \"ai_comment\": a humorous remark about the article, at most 40 characters\n\
         - \"tag_match\": the reader tag that justifies the recommendation, \
         or \"hot pick\" if none applies\n\
         Keep the array in identifier order. Output the JSON array only.",
    );

    out
}

/// The short free-text prompt behind the daily highlights teaser.
pub fn build_highlights_prompt(articles: &[Article]) -> String {
    let mut out = String::from("Today's freshest tech articles:\n\n");
    for article in articles {
        out.push_str(&format!("- {} ({})\n", article.title, article.source));
    }
    out.push_str(
        "\nWrite one short, punchy sentence (under 50 words) teasing today's \
         highlights. Plain text only.",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use techtide_core::article::Source;

    fn article(url: &str, title: &str, summary: &str, tags: &[&str]) -> Article {
        Article {
            url: url.into(),
            title: title.into(),
            summary: summary.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            source: Source::Juejin,
            top_image: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn identifiers_are_one_based_and_sequential() {
        let candidates = vec![
            article("https://a.example/1", "First", "s1", &["Rust"]),
            article("https://a.example/2", "Second", "s2", &[]),
        ];
        let prompt = build_prompt(&candidates, &[]);

        let first = prompt.find("[1]").unwrap();
        let second = prompt.find("[2]").unwrap();
        assert!(first < second);
        assert!(!prompt.contains("[0]"));
        assert!(!prompt.contains("[3]"));
    }

    #[test]
    fn empty_summary_and_tags_get_placeholders() {
        let candidates = vec![article("https://a.example/1", "First", "  ", &[])];
        let prompt = build_prompt(&candidates, &[]);
        assert!(prompt.contains("summary: (no summary)"));
        assert!(prompt.contains("tags: none"));
    }

    #[test]
    fn interests_and_protocol_are_spelled_out() {
        let candidates = vec![article("https://a.example/1", "First", "s", &["Rust"])];
        let prompt = build_prompt(&candidates, &["Rust".into(), "AI".into()]);

        assert!(prompt.contains("Reader interests: Rust, AI"));
        assert!(prompt.contains("\"index\""));
        assert!(prompt.contains("\"ai_comment\""));
        assert!(prompt.contains("\"tag_match\""));
        assert!(prompt.contains(HOT_PICK));
        assert!(prompt.contains("https://a.example/1"));
    }

    #[test]
    fn highlights_prompt_lists_titles() {
        let articles = vec![
            article("https://a.example/1", "Rust 2.0 announced", "", &[]),
            article("https://a.example/2", "New kernel release", "", &[]),
        ];
        let prompt = build_highlights_prompt(&articles);
        assert!(prompt.contains("Rust 2.0 announced"));
        assert!(prompt.contains("New kernel release"));
        assert!(prompt.contains("Juejin"));
    }
}
