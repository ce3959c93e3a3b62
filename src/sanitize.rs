use anyhow::{Context, Result};

use crate::payload::TrendPayload;

/// Strip markdown code fences from a model reply.
///
/// If the text contains a fenced block, return the first block's interior
/// (the language tag on the opening fence is dropped). Otherwise strip any
/// stray leading/trailing backtick tokens. Text with no backticks at its
/// edges passes through byte-for-byte unchanged.
pub fn strip_code_fences(raw: &str) -> String {
    if let Some(open) = raw.find("```") {
        let after_open = &raw[open + 3..];
        // Skip the language tag, if any, up to the first newline.
        let body = match after_open.find('\n') {
            Some(nl) => &after_open[nl + 1..],
            None => after_open.trim_start_matches(|c: char| c.is_alphanumeric()),
        };
        let inner = match body.find("```") {
            Some(close) => &body[..close],
            None => body,
        };
        return inner.trim().to_string();
    }

    let trimmed = raw.trim();
    if trimmed.starts_with('`') || trimmed.ends_with('`') {
        return trimmed.trim_matches('`').trim().to_string();
    }

    raw.to_string()
}

/// Parse a sanitized model reply into the typed payload. Malformed content
/// is an error for the caller, never silently recovered.
pub fn parse_payload(raw: &str) -> Result<TrendPayload> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned)
        .with_context(|| format!("Malformed scan payload ({} chars)", cleaned.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_with_language_tag() {
        let body = r#"{"products": []}"#;
        let fenced = format!("```json\n{}\n```", body);
        assert_eq!(strip_code_fences(&fenced), body);
    }

    #[test]
    fn fenced_block_without_language_tag() {
        let body = r#"{"a": 1}"#;
        let fenced = format!("```\n{}\n```\ntrailing chatter", body);
        assert_eq!(strip_code_fences(&fenced), body);
    }

    #[test]
    fn unfenced_text_passes_through() {
        let body = r#"{"products": [], "historicalTop5": []}"#;
        assert_eq!(strip_code_fences(body), body);
    }

    #[test]
    fn token_free_text_keeps_its_whitespace() {
        let body = "  {\"products\": []} \n";
        assert_eq!(strip_code_fences(body), body);
    }

    #[test]
    fn stray_backticks_are_stripped() {
        assert_eq!(strip_code_fences("`{\"a\":1}`"), "{\"a\":1}");
    }

    #[test]
    fn unterminated_fence_keeps_remainder() {
        let fenced = "```json\n{\"products\": null}";
        assert_eq!(strip_code_fences(fenced), "{\"products\": null}");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_payload("```json\nnot json at all\n```").is_err());
    }

    #[test]
    fn null_collections_parse_to_empty() {
        let payload = parse_payload(r#"{"products": null}"#).unwrap();
        assert!(payload.products.is_empty());
        assert!(payload.historical_top5.is_empty());
        assert!(payload.global_trends.is_empty());
    }
}
