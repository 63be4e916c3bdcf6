use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Something that runs a task before the next repaint, passing the frame timestamp (ms).
pub trait FrameScheduler {
    fn request_frame(&self, task: Box<dyn FnOnce(f64)>);
}

#[derive(Clone)]
pub struct BrowserFrames {
    window: Window,
}

impl BrowserFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for BrowserFrames {
    fn request_frame(&self, task: Box<dyn FnOnce(f64)>) {
        let callback = Closure::once_into_js(move |timestamp: f64| task(timestamp));
        if let Err(err) = self.window.request_animation_frame(callback.unchecked_ref()) {
            warn!("requestAnimationFrame failed: {:?}", err);
        }
    }
}
