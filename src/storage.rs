/// Note-store mapping for chrome.storage.sync
///
/// The store is a flat key-value map: the page URL (exact string, scheme and
/// query included) maps to a single note string. `get([url])` resolves to an
/// object with at most that one key; `set` takes the same shape. The helpers
/// here translate between those objects and note strings so the bridge code
/// in the UI stays a thin passthrough.
use serde_json::{json, Value};

/// Pull the note for `url` out of a storage lookup result. A missing key, a
/// null value, or a non-string value all read as the empty note.
pub fn note_from_lookup(result: &Value, url: &str) -> String {
    result
        .get(url)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// Build the `{url: note}` object a save passes to the store. Saving an
/// empty note is a legal overwrite, not a deletion.
pub fn note_entry(url: &str, note: &str) -> Value {
    json!({ url: note })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_from_lookup_present() {
        let result = json!({ "https://example.com/post?q=1": "check section 3" });
        assert_eq!(
            note_from_lookup(&result, "https://example.com/post?q=1"),
            "check section 3"
        );
    }

    #[test]
    fn test_note_from_lookup_absent_is_empty() {
        assert_eq!(note_from_lookup(&json!({}), "https://example.com"), "");
        assert_eq!(note_from_lookup(&Value::Null, "https://example.com"), "");
    }

    #[test]
    fn test_note_from_lookup_exact_url_match() {
        // Keys match on the exact string: scheme and query string included.
        let result = json!({ "https://example.com/post": "note" });
        assert_eq!(note_from_lookup(&result, "http://example.com/post"), "");
        assert_eq!(note_from_lookup(&result, "https://example.com/post?x=1"), "");
        assert_eq!(note_from_lookup(&result, "https://example.com/post"), "note");
    }

    #[test]
    fn test_note_from_lookup_non_string_value() {
        let result = json!({ "https://example.com": 42 });
        assert_eq!(note_from_lookup(&result, "https://example.com"), "");
    }

    #[test]
    fn test_note_entry_shape() {
        let entry = note_entry("https://example.com/post", "remember this");
        assert_eq!(entry, json!({ "https://example.com/post": "remember this" }));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let url = "https://example.com/post";
        let entry = note_entry(url, "remember this");
        assert_eq!(note_from_lookup(&entry, url), "remember this");

        let empty = note_entry(url, "");
        assert_eq!(note_from_lookup(&empty, url), "");
    }
}
