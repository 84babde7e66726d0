/// Browser implementation of the embed backend
use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

use super::{Capability, EmbedBackend, EmbedEnvironment, EmbedError, EmbedSurface, ScriptProvider};
use crate::constants::INSTAGRAM_EMBED_VERSION;

thread_local! {
    static ENVIRONMENT: Rc<EmbedEnvironment<DomBackend>> =
        Rc::new(EmbedEnvironment::new(DomBackend));
}

/// The page-wide embed environment
pub fn environment() -> Rc<EmbedEnvironment<DomBackend>> {
    ENVIRONMENT.with(|env| env.clone())
}

#[derive(Serialize)]
struct TweetOptions {
    theme: &'static str,
    width: &'static str,
    align: &'static str,
}

pub struct DomBackend;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Follow a property path from `window`, stopping at null/undefined
fn lookup(path: &[&str]) -> Option<JsValue> {
    let mut value: JsValue = web_sys::window()?.into();
    for key in path {
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
    }
    Some(value)
}

fn lookup_function(owner: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(owner, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

/// Provider namespace object and the function name that must exist on it
fn api_path(provider: ScriptProvider) -> (&'static [&'static str], &'static str) {
    match provider {
        ScriptProvider::Twitter => (&["twttr", "widgets"][..], "createTweet"),
        ScriptProvider::Instagram => (&["instgrm", "Embeds"][..], "process"),
    }
}

fn provider_api(provider: ScriptProvider) -> Result<(JsValue, Function), EmbedError> {
    let (path, function) = api_path(provider);
    lookup(path)
        .and_then(|owner| lookup_function(&owner, function).map(|f| (owner, f)))
        .ok_or(EmbedError::ProviderMissing(provider))
}

fn js_error(e: JsValue) -> EmbedError {
    EmbedError::Create(format!("{:?}", e))
}

fn append_script(
    src: &'static str,
    done: oneshot::Sender<Result<(), EmbedError>>,
) -> Result<(), EmbedError> {
    let failed = || EmbedError::ScriptLoad(src.to_string());

    let document = document().ok_or_else(failed)?;
    let head = document.head().ok_or_else(failed)?;
    let script: HtmlElement = document
        .create_element("script")
        .ok()
        .and_then(|el| el.dyn_into().ok())
        .ok_or_else(failed)?;
    script.set_attribute("src", src).map_err(|_| failed())?;
    script.set_attribute("async", "").map_err(|_| failed())?;

    let sender = Rc::new(RefCell::new(Some(done)));
    let on_load = {
        let sender = sender.clone();
        Closure::once_into_js(move || {
            if let Some(done) = sender.borrow_mut().take() {
                let _ = done.send(Ok(()));
            }
        })
    };
    let on_error = Closure::once_into_js(move || {
        if let Some(done) = sender.borrow_mut().take() {
            let _ = done.send(Err(EmbedError::ScriptLoad(src.to_string())));
        }
    });
    script.set_onload(Some(on_load.unchecked_ref()));
    script.set_onerror(Some(on_error.unchecked_ref()));

    head.append_child(&script).map_err(|_| failed())?;
    Ok(())
}

fn call_create_tweet(tweet_id: &str, container: &Element) -> Result<Promise, EmbedError> {
    let (widgets, create_tweet) = provider_api(ScriptProvider::Twitter)?;
    let options = serde_wasm_bindgen::to_value(&TweetOptions {
        theme: "light",
        width: "100%",
        align: "center",
    })
    .map_err(|e| EmbedError::Create(e.to_string()))?;

    let returned = create_tweet
        .call3(
            &widgets,
            &JsValue::from_str(tweet_id),
            &JsValue::from(container.clone()),
            &options,
        )
        .map_err(js_error)?;

    Ok(Promise::resolve(&returned))
}

impl EmbedBackend for DomBackend {
    type Surface = DomSurface;

    /// Resolves on the script's `load` event, fails on `error`, and never
    /// settles if neither fires.
    fn inject_script(&self, provider: ScriptProvider) -> LocalBoxFuture<'static, Result<(), EmbedError>> {
        let src = provider.script_url();
        let (done, loaded) = oneshot::channel();
        let injected = append_script(src, done);

        async move {
            injected?;
            loaded
                .await
                .unwrap_or_else(|_| Err(EmbedError::ScriptLoad(src.to_string())))
        }
        .boxed_local()
    }

    fn capability(&self, provider: ScriptProvider) -> Capability {
        match provider_api(provider) {
            Ok(_) => Capability::Present,
            Err(_) => Capability::Absent,
        }
    }

    fn create_tweet(
        &self,
        tweet_id: &str,
        surface: &DomSurface,
    ) -> LocalBoxFuture<'static, Result<(), EmbedError>> {
        let created = call_create_tweet(tweet_id, &surface.element);

        async move {
            let element = JsFuture::from(created?).await.map_err(js_error)?;
            // widgets.js resolves with undefined when the tweet cannot be shown
            if element.is_undefined() {
                return Err(EmbedError::Create("tweet unavailable".to_string()));
            }
            Ok(())
        }
        .boxed_local()
    }

    fn process_instagram(&self) -> Result<(), EmbedError> {
        let (embeds, process) = provider_api(ScriptProvider::Instagram)?;
        process.call0(&embeds).map(|_| ()).map_err(js_error)
    }
}

/// A card's embed container element
pub struct DomSurface {
    element: Element,
}

impl DomSurface {
    pub fn new(element: Element) -> Self {
        DomSurface { element }
    }

    fn append(&self, tag: &str, attributes: &[(&str, &str)], text: Option<&str>) -> Result<(), JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let child = document.create_element(tag)?;
        for (name, value) in attributes {
            child.set_attribute(name, value)?;
        }
        if text.is_some() {
            child.set_text_content(text);
        }
        self.element.append_child(&child)?;
        Ok(())
    }

    fn append_logged(&self, tag: &str, attributes: &[(&str, &str)], text: Option<&str>) {
        if let Err(e) = self.append(tag, attributes, text) {
            log::warn!("Failed to append <{}> to embed container: {:?}", tag, e);
        }
    }
}

impl EmbedSurface for DomSurface {
    fn clear(&self) {
        self.element.set_inner_html("");
    }

    fn is_live(&self) -> bool {
        self.element.is_connected()
    }

    fn attach_frame(&self, src: &str) {
        self.append_logged(
            "iframe",
            &[
                ("src", src),
                ("width", "100%"),
                ("height", "315"),
                ("title", "YouTube video player"),
                ("frameborder", "0"),
                (
                    "allow",
                    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
                ),
                ("allowfullscreen", ""),
            ],
            None,
        );
    }

    fn attach_instagram_quote(&self, permalink: &str) {
        self.append_logged(
            "blockquote",
            &[
                ("class", "instagram-media"),
                ("data-instgrm-permalink", permalink),
                ("data-instgrm-version", INSTAGRAM_EMBED_VERSION),
            ],
            None,
        );
    }

    fn show_fallback_link(&self, url: &str) {
        self.append_logged(
            "a",
            &[
                ("href", url),
                ("target", "_blank"),
                ("rel", "noopener noreferrer"),
                ("class", "embed-fallback-link"),
            ],
            Some(url),
        );
    }
}
