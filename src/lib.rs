/// Link Memo - bookmark social media links and view them as live embeds
/// Built with Rust + WASM + Yew

pub mod constants;
pub mod download;
pub mod embed;
pub mod memo_data;
pub mod operations;
pub mod storage;
pub mod store;
pub mod ui;
pub mod url_utils;
pub mod validation;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the URL classifier for JavaScript access
#[wasm_bindgen]
pub fn classify_url(url: &str) -> String {
    url_utils::classify(url).as_str().to_string()
}

#[wasm_bindgen]
pub fn domain_of(url: &str) -> String {
    url_utils::domain_of(url)
}

// Start the Yew app
#[wasm_bindgen]
pub fn start_app() {
    yew::Renderer::<ui::app::App>::new().render();
}
