/// Data structures for one popup session
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The active browser tab, as returned by the tab query bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveTabInfo {
    pub id: i32,
    pub url: String,
    pub title: String,
}

/// Raw metadata read out of the page by the injected script. Every field is
/// optional: a page without the tags, or a page the script cannot run on,
/// yields an empty value, never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageMetadata {
    #[serde(default)]
    pub author: Option<String>,
    /// `article:published_time` or an equivalent structured tag.
    #[serde(default)]
    pub published_time: Option<String>,
    /// Generic `date` meta tag, used only when no structured tag exists.
    #[serde(default)]
    pub date_meta: Option<String>,
    /// Computed base font size of the page body, e.g. "16px".
    #[serde(default)]
    pub font_size: Option<String>,
}

impl RawPageMetadata {
    /// Author name with blank values treated as absent.
    pub fn author_name(&self) -> Option<String> {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// The raw publish-time string, structured tag first, generic tag second.
    pub fn published_raw(&self) -> Option<&str> {
        non_blank(self.published_time.as_deref()).or_else(|| non_blank(self.date_meta.as_deref()))
    }

    /// Publish date if any tag was present and parseable.
    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.published_raw().and_then(parse_publish_date)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a publish-time string as found in the wild: RFC 3339 first, then a
/// bare `YYYY-MM-DD`, then a datetime without an offset. Anything else is
/// treated as absence so the caller falls back to the access date.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    None
}

/// Everything the citation formatter needs about the current page. Built
/// once from the active tab, completed at most once when the metadata script
/// resolves, and passed by reference into every render.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    pub url: String,
    pub raw_title: String,
    pub access_date: NaiveDate,
    pub author_name: Option<String>,
    pub publish_date: Option<NaiveDate>,
}

impl PageContext {
    pub fn new(url: String, raw_title: String, access_date: NaiveDate) -> PageContext {
        PageContext {
            url,
            raw_title,
            access_date,
            author_name: None,
            publish_date: None,
        }
    }

    /// Fill in the asynchronously discovered fields.
    pub fn apply_metadata(&mut self, metadata: &RawPageMetadata) {
        self.author_name = metadata.author_name();
        self.publish_date = metadata.publish_date();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish_date_rfc3339() {
        assert_eq!(
            parse_publish_date("2024-03-01T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_publish_date("2024-03-01T10:30:00+02:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_publish_date_bare_date() {
        assert_eq!(parse_publish_date("2024-03-01"), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(parse_publish_date("  2024-03-01  "), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_parse_publish_date_naive_datetime() {
        assert_eq!(
            parse_publish_date("2024-03-01T10:30:00"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_publish_date_garbage_is_none() {
        assert_eq!(parse_publish_date("yesterday"), None);
        assert_eq!(parse_publish_date("03/01/2024"), None);
        assert_eq!(parse_publish_date(""), None);
    }

    #[test]
    fn test_published_raw_prefers_structured_tag() {
        let metadata = RawPageMetadata {
            published_time: Some("2024-03-01T10:30:00Z".to_string()),
            date_meta: Some("2023-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.published_raw(), Some("2024-03-01T10:30:00Z"));
        assert_eq!(metadata.publish_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_published_raw_falls_back_to_date_meta() {
        let metadata = RawPageMetadata {
            published_time: Some("   ".to_string()),
            date_meta: Some("2023-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.published_raw(), Some("2023-01-01"));
    }

    #[test]
    fn test_author_name_blank_is_absent() {
        let metadata = RawPageMetadata {
            author: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.author_name(), None);

        let metadata = RawPageMetadata {
            author: Some(" Jane Smith ".to_string()),
            ..Default::default()
        };
        assert_eq!(metadata.author_name(), Some("Jane Smith".to_string()));
    }

    #[test]
    fn test_apply_metadata() {
        let mut context = PageContext::new(
            "https://example.com".to_string(),
            "A Story".to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        );
        assert_eq!(context.author_name, None);
        assert_eq!(context.publish_date, None);

        let metadata = RawPageMetadata {
            author: Some("Jane Smith".to_string()),
            published_time: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        context.apply_metadata(&metadata);

        assert_eq!(context.author_name, Some("Jane Smith".to_string()));
        assert_eq!(context.publish_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_metadata_deserializes_camel_case() {
        let json = r#"{
            "author": "Jane Smith",
            "publishedTime": "2024-03-01T10:30:00Z",
            "dateMeta": null,
            "fontSize": "16px"
        }"#;
        let metadata: RawPageMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.author.as_deref(), Some("Jane Smith"));
        assert_eq!(metadata.font_size.as_deref(), Some("16px"));
        assert_eq!(metadata.publish_date(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_metadata_deserializes_missing_fields() {
        let metadata: RawPageMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(metadata, RawPageMetadata::default());
        assert_eq!(metadata.publish_date(), None);
    }

    #[test]
    fn test_tab_info_round_trip() {
        let tab = ActiveTabInfo {
            id: 7,
            url: "https://example.com/post".to_string(),
            title: "A Story".to_string(),
        };
        let json = serde_json::to_string(&tab).unwrap();
        let parsed: ActiveTabInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tab);
    }
}
