use gloo_timers::callback::Timeout;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Reflect;
use web_sys::{AddEventListenerOptions, Document, IdleRequestOptions, Window};

use crate::error::FxError;
use crate::frame::{BrowserFrames, FrameScheduler};

/// Delay used when the browser has no `requestIdleCallback`.
pub const IDLE_FALLBACK_MS: u32 = 1;

pub fn is_ready(ready_state: &str) -> bool {
    ready_state != "loading"
}

/// Runs `task` now if the document has finished parsing, else on `DOMContentLoaded`.
pub fn on_ready(document: &Document, task: impl FnOnce() + 'static) -> Result<(), FxError> {
    if is_ready(&document.ready_state()) {
        task();
        return Ok(());
    }
    let callback = Closure::once_into_js(task);
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        callback.unchecked_ref(),
        &options,
    )?;
    Ok(())
}

pub fn next_frame(window: &Window, task: impl FnOnce() + 'static) {
    BrowserFrames::new(window.clone()).request_frame(Box::new(move |_: f64| task()));
}

pub fn when_idle(window: &Window, timeout_ms: u32, task: impl FnOnce() + 'static) {
    let supported = Reflect::has(window, &JsValue::from_str("requestIdleCallback")).unwrap_or(false);
    if !supported {
        Timeout::new(IDLE_FALLBACK_MS, task).forget();
        return;
    }

    let callback = Closure::once_into_js(move |_deadline: JsValue| task());
    let options = IdleRequestOptions::new();
    options.set_timeout(timeout_ms);
    if let Err(err) = window.request_idle_callback_with_options(callback.unchecked_ref(), &options) {
        warn!("requestIdleCallback failed, idle effects skipped: {:?}", err);
    }
}
