/// Popup UI for the Cite Keeper extension

use yew::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use patternfly_yew::prelude::*;
use chrono::NaiveDate;

use crate::citation::{self, CitationStyle};
use crate::page::{ActiveTabInfo, PageContext, RawPageMetadata};
use crate::storage;
use crate::ui::components::{CitationPreview, FlashNotice};

// Import JS bridge functions
#[wasm_bindgen(module = "/popup.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn readPageMetadata(tab_id: i32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(entries: JsValue) -> Result<(), JsValue>;
}

/// How long the copy/save acknowledgments stay visible.
const FLASH_MILLIS: i32 = 1200;

#[derive(Clone, PartialEq)]
enum ActiveView {
    Citations,
    Notes,
}

#[function_component(App)]
pub fn app() -> Html {
    let context = use_state_eq(|| None::<PageContext>);
    let style_value = use_state_eq(|| CitationStyle::Mla.as_value().to_string());
    let note_text = use_state_eq(String::new);
    let active_view = use_state_eq(|| ActiveView::Citations);
    let copied = use_state_eq(|| false);
    let saved = use_state_eq(|| false);
    let warning = use_state_eq(|| None::<String>);

    // On mount: query the active tab, render once with defaults, then fetch
    // page metadata and the stored note in the background.
    {
        let context = context.clone();
        let note_text = note_text.clone();
        let warning = warning.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let tab = match query_active_tab().await {
                    Ok(tab) => tab,
                    Err(e) => {
                        log::warn!("active tab query failed: {}", e);
                        warning.set(Some("Could not read the active tab.".to_string()));
                        return;
                    }
                };

                let mut session =
                    PageContext::new(tab.url.clone(), tab.title.clone(), today());
                context.set(Some(session.clone()));

                match load_note(&tab.url).await {
                    Ok(text) => note_text.set(text),
                    Err(e) => {
                        log::warn!("note load failed: {}", e);
                        warning.set(Some("Could not load the saved note.".to_string()));
                    }
                }

                // One-shot metadata read; failure degrades to defaults.
                match read_page_metadata(tab.id).await {
                    Ok(metadata) => {
                        if let Some(size) = metadata.font_size.as_deref() {
                            apply_host_font_size(size);
                        }
                        session.apply_metadata(&metadata);
                        context.set(Some(session));
                    }
                    Err(e) => {
                        log::warn!("page metadata read failed: {}", e);
                    }
                }
            });
            || ()
        });
    }

    // Style selector: re-renders the citation via state alone.
    let on_style_change = {
        let style_value = style_value.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            style_value.set(select.value());
        })
    };

    let citation_html = (*context)
        .as_ref()
        .map(|ctx| citation::for_style_value(ctx, &style_value))
        .unwrap_or_default();

    // Copy the rendered citation as plain text, legacy select+copy path.
    let on_copy = {
        let citation_html = citation_html.clone();
        let copied = copied.clone();
        Callback::from(move |_| {
            let text = citation::plain_text(&citation_html);
            if copy_via_textarea(&text) {
                flash(copied.clone());
            } else {
                log::warn!("clipboard copy failed");
            }
        })
    };

    let on_note_input = {
        let note_text = note_text.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            note_text.set(area.value());
        })
    };

    // Save the note for the current URL. Last write wins; no queuing.
    let on_save = {
        let context = context.clone();
        let note_text = note_text.clone();
        let saved = saved.clone();
        let warning = warning.clone();
        Callback::from(move |_| {
            let Some(session) = (*context).clone() else {
                return;
            };
            let text = (*note_text).clone();
            let saved = saved.clone();
            let warning = warning.clone();
            spawn_local(async move {
                match save_note(&session.url, &text).await {
                    Ok(()) => flash(saved),
                    Err(e) => {
                        log::warn!("note save failed: {}", e);
                        warning.set(Some("Could not save the note.".to_string()));
                    }
                }
            });
        })
    };

    let on_view_click = {
        let active_view = active_view.clone();
        move |view: ActiveView| {
            let active_view = active_view.clone();
            Callback::from(move |_| {
                active_view.set(view.clone());
            })
        }
    };

    let view_tab_class = |view: ActiveView| {
        if *active_view == view {
            "pf-v5-c-tabs__item pf-m-current"
        } else {
            "pf-v5-c-tabs__item"
        }
    };

    let loading = context.is_none() && warning.is_none();

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Cite Keeper"}</h1>

            if let Some(message) = (*warning).clone() {
                <Alert r#type={AlertType::Warning} title={message} inline={true}>
                </Alert>
            }

            // View navigation
            <div class="pf-v5-c-tabs tabs-nav">
                <ul class="pf-v5-c-tabs__list">
                    <li class={view_tab_class(ActiveView::Citations)}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_view_click(ActiveView::Citations)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Citations"}</span>
                        </button>
                    </li>
                    <li class={view_tab_class(ActiveView::Notes)}>
                        <button
                            class="pf-v5-c-tabs__link"
                            onclick={on_view_click(ActiveView::Notes)}
                        >
                            <span class="pf-v5-c-tabs__item-text">{"Notes"}</span>
                        </button>
                    </li>
                </ul>
            </div>

            if loading {
                <div class="loading-text-center">
                    <Spinner />
                    <p class="loading-text">{"Reading the active tab..."}</p>
                </div>
            }

            // View content; switching views never touches citation or note data.
            <div class="tab-pane-content">
                {match &*active_view {
                    ActiveView::Citations => html! {
                        <div class="flex-column-gap">
                            <select class="style-select" onchange={on_style_change}>
                                <option
                                    value={CitationStyle::Mla.as_value()}
                                    selected={*style_value == CitationStyle::Mla.as_value()}
                                >
                                    {"MLA"}
                                </option>
                                <option
                                    value={CitationStyle::Apa.as_value()}
                                    selected={*style_value == CitationStyle::Apa.as_value()}
                                >
                                    {"APA"}
                                </option>
                            </select>

                            <CitationPreview html={citation_html.clone()} />

                            <Button
                                onclick={on_copy}
                                disabled={citation_html.is_empty()}
                                variant={ButtonVariant::Secondary}
                                block={true}
                            >
                                {"Copy Citation"}
                            </Button>
                            <FlashNotice visible={*copied} message={"Copied!"} />
                        </div>
                    },
                    ActiveView::Notes => html! {
                        <div class="flex-column-gap">
                            <textarea
                                class="notes-box"
                                placeholder="Notes for this page..."
                                value={(*note_text).clone()}
                                oninput={on_note_input}
                            />
                            <Button
                                onclick={on_save}
                                disabled={context.is_none()}
                                variant={ButtonVariant::Secondary}
                                block={true}
                            >
                                {"Save Note"}
                            </Button>
                            <FlashNotice visible={*saved} message={"Note saved!"} />
                        </div>
                    },
                }}
            </div>

            <p class="footer-popup">
                {"Cite Keeper v0.1.0"}
            </p>
        </div>
    }
}

// Helper functions

async fn query_active_tab() -> Result<ActiveTabInfo, String> {
    let tab_js = getActiveTab()
        .await
        .map_err(|e| format!("Failed to query active tab: {:?}", e))?;
    serde_wasm_bindgen::from_value(tab_js).map_err(|e| format!("Failed to parse tab: {:?}", e))
}

async fn read_page_metadata(tab_id: i32) -> Result<RawPageMetadata, String> {
    let metadata_js = readPageMetadata(tab_id)
        .await
        .map_err(|e| format!("Failed to read page metadata: {:?}", e))?;

    // A page the script cannot run on yields no result at all.
    if metadata_js.is_null() || metadata_js.is_undefined() {
        return Ok(RawPageMetadata::default());
    }

    serde_wasm_bindgen::from_value(metadata_js)
        .map_err(|e| format!("Failed to parse metadata: {:?}", e))
}

async fn load_note(url: &str) -> Result<String, String> {
    let result_js = getStorage(url)
        .await
        .map_err(|e| format!("Failed to get storage: {:?}", e))?;

    if result_js.is_null() || result_js.is_undefined() {
        return Ok(String::new());
    }

    let result: serde_json::Value = serde_wasm_bindgen::from_value(result_js)
        .map_err(|e| format!("Failed to parse storage: {:?}", e))?;
    Ok(storage::note_from_lookup(&result, url))
}

async fn save_note(url: &str, text: &str) -> Result<(), String> {
    let entry = storage::note_entry(url, text);
    let entry_js = serde_wasm_bindgen::to_value(&entry)
        .map_err(|e| format!("Failed to serialize note: {:?}", e))?;
    setStorage(entry_js)
        .await
        .map_err(|e| format!("Failed to save note: {:?}", e))
}

/// Today's date in the browser's local time zone.
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

/// Show a transient acknowledgment flag for FLASH_MILLIS.
fn flash(handle: UseStateHandle<bool>) {
    handle.set(true);
    let Some(window) = web_sys::window() else {
        return;
    };
    let hide = Closure::<dyn FnMut()>::new(move || handle.set(false));
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        hide.as_ref().unchecked_ref(),
        FLASH_MILLIS,
    );
    hide.forget();
}

/// Legacy clipboard path: select the text in a transient off-screen textarea
/// and run the copy command. Returns whether the copy was reported to work.
fn copy_via_textarea(text: &str) -> bool {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return false;
    };
    let Ok(element) = document.create_element("textarea") else {
        return false;
    };
    let area: HtmlTextAreaElement = element.unchecked_into();
    area.set_value(text);
    let _ = area.style().set_property("position", "fixed");
    let _ = area.style().set_property("left", "-9999px");

    let Some(body) = document.body() else {
        return false;
    };
    if body.append_child(&area).is_err() {
        return false;
    }
    area.select();
    // exec_command lives on HtmlDocument, not Document
    let copied = document
        .dyn_ref::<web_sys::HtmlDocument>()
        .map(|html_doc| html_doc.exec_command("copy").unwrap_or(false))
        .unwrap_or(false);
    let _ = body.remove_child(&area);
    copied
}

/// Cosmetic only: match the popup's base font size to the host page's.
/// Unavailability or failure is ignored.
fn apply_host_font_size(size: &str) {
    if size.is_empty() {
        return;
    }
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Some(root) = document.document_element() {
        if let Some(root) = root.dyn_ref::<web_sys::HtmlElement>() {
            let _ = root.style().set_property("font-size", size);
        }
    }
}
