//! Recovers the JSON payload from a model reply.
//!
//! Handles a single optional fence pair around the whole reply (```` ```json ````
//! or a bare ```` ``` ```` opener, and a ```` ``` ```` closer). A leftover fence
//! in a body that does not parse is reported as unparseable instead of being fed
//! to the JSON parser. Backticks inside JSON string values are left alone.

use serde::de::IgnoredAny;

use crate::error::{AppError, Result};

const FENCE: &str = "```";

pub fn normalize(raw: &str) -> Result<String> {
    let text = raw.trim();

    let (opened, body) = match text.strip_prefix(FENCE) {
        Some(rest) => (true, strip_language(rest)?),
        None => (false, text),
    };
    let (closed, body) = match body.strip_suffix(FENCE) {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    if opened != closed {
        return Err(AppError::UnparseableOutput("unbalanced code fence".to_string()));
    }
    let body = body.trim();
    if body.contains(FENCE) && serde_json::from_str::<IgnoredAny>(body).is_err() {
        return Err(AppError::UnparseableOutput(
            "more than one code block in model output".to_string(),
        ));
    }

    if body.is_empty() {
        return Err(AppError::UnparseableOutput("empty model output".to_string()));
    }
    Ok(body.to_string())
}

/// Drops the info string after an opening fence. Only `json` (any case) or none is accepted.
fn strip_language(after_fence: &str) -> Result<&str> {
    let tag_len = after_fence
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(after_fence.len());
    let (tag, rest) = after_fence.split_at(tag_len);

    if tag.is_empty() || tag.eq_ignore_ascii_case("json") {
        return Ok(rest);
    }
    Err(AppError::UnparseableOutput(format!(
        "code block is tagged `{}`, expected json",
        tag
    )))
}
