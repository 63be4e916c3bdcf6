//! Thin helpers over web-sys shared by the effect installers.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement};

use crate::error::FxError;

pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, FxError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_html(document: &Document, selector: &str) -> Result<Option<HtmlElement>, FxError> {
    Ok(document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) -> Result<(), FxError> {
    let style = element.style();
    for (name, value) in properties {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Registers a listener that stays alive for the lifetime of the page.
pub fn listen(
    target: &EventTarget,
    event: &str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), FxError> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

pub fn on_scroll(target: &EventTarget, mut handler: impl FnMut() + 'static) -> Result<(), FxError> {
    listen(target, "scroll", true, move |_| handler())
}
