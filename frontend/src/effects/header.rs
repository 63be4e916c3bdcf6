use log::{debug, warn};

use crate::config::HeaderConfig;
use crate::dom;
use crate::error::FxError;
use crate::frame::BrowserFrames;
use crate::init::Page;
use crate::throttle::FrameThrottle;

pub fn shadow_for<'a>(scroll_y: f64, config: &'a HeaderConfig) -> &'a str {
    if scroll_y > config.threshold {
        &config.shadow
    } else {
        "none"
    }
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let config = page.config.header.clone();
    let Some(header) = dom::query_html(&page.document, &config.selector)? else {
        debug!("No {} on page, header shadow disabled", config.selector);
        return Ok(());
    };

    let window = page.window.clone();
    let throttle = FrameThrottle::new(BrowserFrames::new(window.clone()), move || {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        if let Err(err) = dom::set_styles(&header, &[("box-shadow", shadow_for(scroll_y, &config))]) {
            warn!("Header shadow update failed: {err}");
        }
    });
    dom::on_scroll(&page.window, move || {
        throttle.on_scroll();
    })
}
