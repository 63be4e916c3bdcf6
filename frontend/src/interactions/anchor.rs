use log::debug;
use web_sys::{ScrollBehavior, ScrollToOptions};

use crate::dom;
use crate::error::FxError;
use crate::init::Page;

/// The selector to scroll to, or `None` for a bare `#` or a non-fragment href.
pub fn fragment_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

pub fn scroll_target(target_top: f64, scroll_y: f64, header_height: f64, spacing: f64) -> f64 {
    target_top + scroll_y - header_height - spacing
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let config = &page.config.anchor;
    let anchors = dom::query_all(&page.document, &config.selector)?;
    debug!("Smooth scroll on {} anchor(s)", anchors.len());

    for anchor in anchors {
        let window = page.window.clone();
        let document = page.document.clone();
        let header_selector = config.header_selector.clone();
        let spacing = config.spacing;
        let link = anchor.clone();

        dom::listen(&anchor, "click", false, move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(selector) = fragment_selector(&href) else {
                return;
            };
            // Unknown ids and hrefs that are not valid selectors keep the browser default
            let Ok(Some(target)) = document.query_selector(selector) else {
                return;
            };
            event.prevent_default();

            let header_height = dom::query_html(&document, &header_selector)
                .ok()
                .flatten()
                .map(|header| header.offset_height() as f64)
                .unwrap_or(0.0);
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                window.scroll_y().unwrap_or(0.0),
                header_height,
                spacing,
            );

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}
