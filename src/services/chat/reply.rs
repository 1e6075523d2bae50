use serde::Deserialize;

use crate::models::ModelReply;

/// Shape the model is instructed to produce
#[derive(Debug, Deserialize)]
struct RawReply {
    #[serde(default)]
    answer: Option<String>,
    book_ids: Vec<i64>,
}

/// Removes a surrounding Markdown code fence, with or without a `json` tag
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let inner = trimmed.trim_matches('`').trim_start();
    let inner = match inner.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &inner[4..],
        _ => inner,
    };
    inner.trim()
}

/// Interprets raw model output
///
/// `answer` may be missing (becomes empty); `book_ids` must be present and
/// contain only integers. Anything else is `Unparseable`.
pub fn parse_model_reply(raw: &str) -> ModelReply {
    match serde_json::from_str::<RawReply>(strip_code_fence(raw)) {
        Ok(reply) => ModelReply::Parsed {
            answer: reply.answer.unwrap_or_default().trim().to_string(),
            ids: reply.book_ids,
        },
        Err(e) => ModelReply::Unparseable {
            reason: e.to_string(),
        },
    }
}
