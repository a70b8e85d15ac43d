/// Citation formatting: title casing, author reordering, date formatting,
/// and MLA/APA assembly. Everything here is a pure function of the page
/// context and the selected style.
use crate::page::PageContext;
use crate::website::{self, capitalize_first};
use chrono::NaiveDate;

/// Words kept lowercase in MLA title case unless first or last.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "the", "and", "but", "or", "nor", "for", "so", "of", "on", "in", "to", "with",
    "at", "by", "from",
];

/// Appended to APA output when no publish date was found on the page.
/// The substitution changes the meaning of the parenthetical date, so the
/// reader has to be told about it.
pub const NO_PUBLISH_DATE_WARNING: &str =
    "No publish date found; the access date is shown instead.";

/// Citation style selected in the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationStyle {
    Mla,
    Apa,
}

impl CitationStyle {
    /// Parse the raw value of the style select element.
    pub fn parse(value: &str) -> Option<CitationStyle> {
        match value {
            "mla" => Some(CitationStyle::Mla),
            "apa" => Some(CitationStyle::Apa),
            _ => None,
        }
    }

    pub fn as_value(&self) -> &'static str {
        match self {
            CitationStyle::Mla => "mla",
            CitationStyle::Apa => "apa",
        }
    }
}

/// Generate a citation for the raw value of the style selector.
/// Unknown style values yield an empty string rather than an error.
pub fn for_style_value(context: &PageContext, value: &str) -> String {
    match CitationStyle::parse(value) {
        Some(style) => generate_citation(context, style),
        None => String::new(),
    }
}

/// Generate a citation in the given style. The website name is rendered in
/// `<em>` markup; use [`plain_text`] for the clipboard form.
pub fn generate_citation(context: &PageContext, style: CitationStyle) -> String {
    let host = website::hostname(&context.url);
    let site = website::website_name(&host);
    let cleaned = clean_title(&context.raw_title, &site);

    match style {
        CitationStyle::Mla => {
            let title = escape_html(&title_case(&cleaned));
            let author = context
                .author_name
                .as_deref()
                .map(|name| format!("{}, ", escape_html(&format_author_mla(name))))
                .unwrap_or_default();
            format!(
                "{}\"{}.\" <em>{}</em>, {}. Accessed {}.",
                author,
                title,
                escape_html(&site),
                escape_html(&display_url(&context.url)),
                format_access_date(context.access_date)
            )
        }
        CitationStyle::Apa => {
            let title = escape_html(&sentence_case(&cleaned));
            let author = context
                .author_name
                .as_deref()
                .map(|name| format!("{} ", escape_html(&format_author_apa(name))))
                .unwrap_or_default();
            match context.publish_date {
                Some(published) => format!(
                    "{}({}). {}. <em>{}</em>. {}",
                    author,
                    format_publish_date(published),
                    title,
                    escape_html(&site),
                    escape_html(&context.url)
                ),
                None => format!(
                    "{}({}). {}. <em>{}</em>. {} [{}]",
                    author,
                    format_access_date(context.access_date),
                    title,
                    escape_html(&site),
                    escape_html(&context.url),
                    NO_PUBLISH_DATE_WARNING
                ),
            }
        }
    }
}

/// Escape text interpolated into the citation markup. Titles, author names,
/// URLs, and fallback site names come from the page; they must read as text,
/// never as markup, when the citation is rendered.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Strip the website name from the end of a raw page title, together with
/// the single separator most sites put in front of it (" - ", " – ", " | ",
/// ": ", or a bare space). Titles that do not end with the website name pass
/// through unchanged. A title that *is* the website name becomes empty.
pub fn clean_title(raw_title: &str, site_name: &str) -> String {
    let title = raw_title.trim();
    if site_name.is_empty() {
        return title.to_string();
    }

    match title.strip_suffix(site_name) {
        Some(rest) => {
            // At most one separator character, then the space before the name.
            let rest = rest.strip_suffix(' ').unwrap_or(rest);
            let rest = rest.strip_suffix(['-', '\u{2013}', '|', ':']).unwrap_or(rest);
            rest.trim_end().to_string()
        }
        None => title.to_string(),
    }
}

/// MLA title case. Split on spaces; words with no lowercase letters are left
/// alone (preserves acronyms), minor words are lowercased unless first or
/// last, everything else gets its first letter upcased with the rest of the
/// word untouched. One trailing period is stripped afterwards.
pub fn title_case(title: &str) -> String {
    let words: Vec<&str> = title.split(' ').collect();
    let last = words.len().saturating_sub(1);

    let cased: Vec<String> = words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if word.is_empty() {
                return String::new();
            }
            if word.chars().all(|c| !c.is_lowercase()) {
                return (*word).to_string();
            }
            let lower = word.to_lowercase();
            if i != 0 && i != last && MINOR_WORDS.contains(&lower.as_str()) {
                return lower;
            }
            capitalize_first(word)
        })
        .collect();

    let joined = cased.join(" ");
    joined.strip_suffix('.').unwrap_or(&joined).to_string()
}

/// APA sentence case. Trims, strips any trailing run of separator/punctuation
/// characters, collapses internal whitespace runs, and upcases only the first
/// character, leaving the rest of the casing as found.
pub fn sentence_case(title: &str) -> String {
    let stripped = title
        .trim()
        .trim_end_matches([' ', '-', '\u{2013}', '|', ':', '.', ',', ';']);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize_first(&collapsed)
}

/// MLA author order: "First Middle Last" becomes "Last, First Middle".
/// Names without a space are left unchanged.
pub fn format_author_mla(name: &str) -> String {
    let name = name.trim();
    match name.rsplit_once(' ') {
        Some((given, family)) => format!("{}, {}", family, given),
        None => name.to_string(),
    }
}

/// APA author order: "First Middle Last" becomes "Last, F. M." — trailing
/// periods on the last token are stripped first, every other token is
/// reduced to its initial. Single-token names only lose trailing periods.
pub fn format_author_apa(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    match tokens.split_last() {
        None => String::new(),
        Some((family, given)) if given.is_empty() => {
            family.trim_end_matches('.').to_string()
        }
        Some((family, given)) => {
            let initials: Vec<String> = given
                .iter()
                .filter_map(|token| token.chars().next())
                .map(|initial| format!("{}.", initial))
                .collect();
            format!("{}, {}", family.trim_end_matches('.'), initials.join(" "))
        }
    }
}

/// Access date, long form: `05 March 2024`.
pub fn format_access_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// Publish date for the APA parenthetical: `March 5, 2024`.
pub fn format_publish_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// The URL as MLA displays it: no scheme, no leading `www.`.
fn display_url(url: &str) -> String {
    let stripped = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    stripped.strip_prefix("www.").unwrap_or(stripped).to_string()
}

/// Clipboard form of a citation: the `<em>` markup removed and the escaped
/// entities restored to plain characters.
pub fn plain_text(citation: &str) -> String {
    citation
        .replace("<em>", "")
        .replace("</em>", "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
