/// Hostname extraction and website display names for Cite Keeper
use url::Url;

/// Known hostnames whose publication name is not derivable from the hostname
/// itself. Lookup keys are lowercase, `www.`-stripped hosts. Extending the
/// table is adding one tuple.
const HOSTNAME_OVERRIDES: &[(&str, &str)] = &[
    ("nytimes.com", "The New York Times"),
    ("washingtonpost.com", "The Washington Post"),
    ("wsj.com", "The Wall Street Journal"),
    ("theguardian.com", "The Guardian"),
    ("theatlantic.com", "The Atlantic"),
    ("newyorker.com", "The New Yorker"),
    ("economist.com", "The Economist"),
    ("bbc.co.uk", "BBC"),
    ("bbc.com", "BBC"),
    ("npr.org", "NPR"),
    ("reuters.com", "Reuters"),
    ("apnews.com", "Associated Press"),
    ("latimes.com", "Los Angeles Times"),
    ("arstechnica.com", "Ars Technica"),
    ("en.wikipedia.org", "Wikipedia"),
    ("stackoverflow.com", "Stack Overflow"),
    ("github.com", "GitHub"),
];

/// Extract the hostname from a URL, stripping a leading `www.` prefix.
///
/// A URL with no scheme is retried with `https://` prepended. Input that
/// still does not parse, or parses without a host, yields an empty string —
/// callers render a blank website name rather than failing.
pub fn hostname(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parsed = Url::parse(trimmed).or_else(|_| Url::parse(&format!("https://{}", trimmed)));

    match parsed {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            host.strip_prefix("www.").unwrap_or(host).to_string()
        }
        Err(_) => String::new(),
    }
}

/// Resolve the display name for a website.
///
/// Hosts in the override table get their canonical publication name,
/// regardless of the case of the input host. Anything else falls back to the
/// first dot-separated label with only its first character upcased; a
/// single-label host (e.g. `localhost`) is its own first label.
pub fn website_name(hostname: &str) -> String {
    let lookup = hostname.to_lowercase();
    if let Some((_, name)) = HOSTNAME_OVERRIDES.iter().find(|(host, _)| *host == lookup) {
        return (*name).to_string();
    }

    let first_label = hostname.split('.').next().unwrap_or("");
    capitalize_first(first_label)
}

/// Upcase the first character, leaving the rest of the string untouched.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
