/// Reusable UI components

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CitationPreviewProps {
    /// Rendered citation, with the website name in `<em>` markup.
    pub html: AttrValue,
}

/// Displays a formatted citation. The citation string carries `<em>` tags
/// for the website name, so it is injected as raw HTML; the formatter
/// HTML-escapes every page-derived field (title, author, URL, site name)
/// during assembly, leaving the `<em>` pair as the only live markup.
#[function_component(CitationPreview)]
pub fn citation_preview(props: &CitationPreviewProps) -> Html {
    let markup = Html::from_html_unchecked(props.html.clone());
    html! {
        <div class="citation-box">
            {markup}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct FlashNoticeProps {
    pub visible: bool,
    pub message: AttrValue,
}

/// Transient acknowledgment shown for about 1.2s after a copy or save.
/// The parent owns the timer; this only renders the badge.
#[function_component(FlashNotice)]
pub fn flash_notice(props: &FlashNoticeProps) -> Html {
    if !props.visible {
        return html! {};
    }
    html! {
        <span class="flash-notice">{props.message.clone()}</span>
    }
}
