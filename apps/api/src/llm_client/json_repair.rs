//! Lenient JSON extraction for model replies.
//!
//! Models wrap JSON in code fences, prefix it with prose, or trail it with
//! commentary. Parsing tries, in order: the raw reply, the first fenced block,
//! and finally the span between the first `{` and the last `}`.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("fenced block pattern is valid")
});

/// Parses a model reply as `T`, tolerating code fences and surrounding prose.
pub fn parse_json_lenient<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }
    serde_json::from_str(extract_json_object(trimmed))
}

/// Returns the most plausible JSON object slice inside `text`.
pub fn extract_json_object(text: &str) -> &str {
    let candidate = FENCED_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);
    trim_to_braces(candidate)
}

fn trim_to_braces(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_extract_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_object(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(extract_json_object(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(extract_json_object(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_drops_leading_and_trailing_prose() {
        let input = "Here is the assessment:\n{\"a\": {\"b\": 1}}\nLet me know if you need more.";
        assert_eq!(extract_json_object(input), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_fenced_block_in_middle_of_reply() {
        let input = "Sure.\n```json\n{\"rating\": \"HIGH\"}\n```\nThanks.";
        let value: Value = parse_json_lenient(input).unwrap();
        assert_eq!(value["rating"], "HIGH");
    }

    #[test]
    fn test_unparseable_reply_is_error() {
        let result: Result<Value, _> = parse_json_lenient("no json here");
        assert!(result.is_err());
    }
}
