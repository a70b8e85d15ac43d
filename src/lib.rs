/// Cite Keeper - Chrome Extension for page citations and notes
/// Built with Rust + WASM + Yew

mod citation;
mod page;
mod storage;
mod website;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the website-name resolution for JavaScript access
#[wasm_bindgen]
pub fn website_display_name(url: &str) -> String {
    website::website_name(&website::hostname(url))
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
