#![cfg(target_arch = "wasm32")]

use link_memo::embed::EmbedSurface;
use link_memo::embed::dom::DomSurface;
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn attached_container() -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let element = document.create_element("div").unwrap();
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn test_fallback_link_opens_in_new_tab() {
    let element = attached_container();
    let surface = DomSurface::new(element.clone());

    surface.show_fallback_link("https://x.com/a/status/1");

    let link = element.query_selector("a.embed-fallback-link").unwrap().unwrap();
    assert_eq!(link.get_attribute("href").as_deref(), Some("https://x.com/a/status/1"));
    assert_eq!(link.get_attribute("target").as_deref(), Some("_blank"));
    assert_eq!(link.text_content().as_deref(), Some("https://x.com/a/status/1"));
}

#[wasm_bindgen_test]
fn test_clear_then_frame() {
    let element = attached_container();
    let surface = DomSurface::new(element.clone());

    surface.show_fallback_link("https://example.com");
    surface.clear();
    surface.attach_frame("https://www.youtube.com/embed/abc");

    assert_eq!(element.child_element_count(), 1);
    let frame = element.query_selector("iframe").unwrap().unwrap();
    assert_eq!(
        frame.get_attribute("src").as_deref(),
        Some("https://www.youtube.com/embed/abc")
    );
}

#[wasm_bindgen_test]
fn test_removed_container_is_not_live() {
    let element = attached_container();
    let surface = DomSurface::new(element.clone());

    assert!(surface.is_live());
    element.remove();
    assert!(!surface.is_live());
}
