//! Media URL list decoding

use serde_json::Value;

/// Decode a stored `media_urls` column into image URLs, preserving order.
///
/// Entries are either plain strings or objects carrying `mediaUrl` or `url`.
/// Malformed data yields an empty list: images are optional.
pub fn decode_media_urls(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Vec::new();
    };

    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "media_urls is not an array, ignoring");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse media_urls, ignoring");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(url) => Some(url.as_str()),
            Value::Object(obj) => obj
                .get("mediaUrl")
                .or_else(|| obj.get("url"))
                .and_then(Value::as_str),
            _ => None,
        })
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_entries_keep_order() {
        let raw = r#"["https://a/1.jpg", {"mediaUrl": "https://a/2.png"}, {"url": "https://a/3.gif"}]"#;
        assert_eq!(
            decode_media_urls(Some(raw)),
            vec!["https://a/1.jpg", "https://a/2.png", "https://a/3.gif"]
        );
    }

    #[test]
    fn test_media_url_preferred_over_url() {
        let raw = r#"[{"mediaUrl": "https://a/preferred.jpg", "url": "https://a/other.jpg"}]"#;
        assert_eq!(decode_media_urls(Some(raw)), vec!["https://a/preferred.jpg"]);
    }

    #[test]
    fn test_unusable_entries_are_dropped() {
        let raw = r#"["", 42, null, {"type": "photo"}, "https://a/ok.jpg"]"#;
        assert_eq!(decode_media_urls(Some(raw)), vec!["https://a/ok.jpg"]);
    }

    #[test]
    fn test_malformed_is_empty() {
        assert!(decode_media_urls(None).is_empty());
        assert!(decode_media_urls(Some("")).is_empty());
        assert!(decode_media_urls(Some("{not json")).is_empty());
        assert!(decode_media_urls(Some(r#"{"url": "https://a/1.jpg"}"#)).is_empty());
    }
}
