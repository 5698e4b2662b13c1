//! Response parsing — model text in, validated annotations out.
//!
//! Models wrap JSON in code fences, return objects instead of arrays, invent
//! indices, and repeat themselves. None of that may take the request down:
//! anything unusable is dropped, and a fully unusable reply is simply an
//! empty annotation list.

use serde_json::Value;
use tracing::warn;

/// One model annotation, tied to a candidate by its request-scoped index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// 1-based candidate position this annotation refers to
    pub index: usize,

    /// The model's remark; may be empty (defaulted later)
    pub comment: String,

    /// The tag the model credited, if any
    pub tag_match: Option<String>,
}

/// Parse the model's reply into annotations for `candidate_count` candidates.
///
/// Element policy:
/// - `index` must be an integer in `[1, candidate_count]`; anything else is
///   discarded silently.
/// - Two elements claiming the same index: the first in array order wins.
pub fn parse_annotations(raw: &str, candidate_count: usize) -> Vec<Annotation> {
    let cleaned = strip_code_fence(raw);

    let value: Value = match serde_json::from_str(cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "annotation payload is not valid JSON");
            return Vec::new();
        }
    };

    let Value::Array(elements) = value else {
        warn!("annotation payload is not a JSON array");
        return Vec::new();
    };

    let mut taken = vec![false; candidate_count];
    let mut annotations = Vec::new();

    for element in &elements {
        let Some(index) = element.get("index").and_then(Value::as_u64) else {
            continue;
        };
        let index = index as usize;
        if index == 0 || index > candidate_count {
            continue;
        }
        if taken[index - 1] {
            // first annotation for an index wins
            continue;
        }
        taken[index - 1] = true;

        let comment = element
            .get("ai_comment")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();

        let tag_match = element
            .get("tag_match")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from);

        annotations.push(Annotation {
            index,
            comment,
            tag_match,
        });
    }

    annotations
}

/// Strip optional surrounding code fences and a leading `json` language tag.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
