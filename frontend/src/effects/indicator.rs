use log::{debug, warn};

use crate::dom;
use crate::error::FxError;
use crate::init::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorStyle {
    Hidden,
    Shown,
}

impl IndicatorStyle {
    pub fn properties(self) -> [(&'static str, &'static str); 2] {
        match self {
            IndicatorStyle::Hidden => [("opacity", "0"), ("pointer-events", "none")],
            IndicatorStyle::Shown => [("opacity", "1"), ("pointer-events", "auto")],
        }
    }
}

/// Tracks whether the indicator is hidden so styles are only written on change.
#[derive(Debug, Clone)]
pub struct IndicatorState {
    threshold: f64,
    hidden: bool,
}

impl IndicatorState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            hidden: false,
        }
    }

    #[cfg(test)]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn update(&mut self, scroll_y: f64) -> Option<IndicatorStyle> {
        let hide = scroll_y > self.threshold;
        if hide == self.hidden {
            return None;
        }
        self.hidden = hide;
        Some(if hide { IndicatorStyle::Hidden } else { IndicatorStyle::Shown })
    }
}

pub fn install(page: &Page) -> Result<(), FxError> {
    if !page.policy.allows_scroll_indicator() {
        debug!("Small screen, scroll indicator left alone");
        return Ok(());
    }
    let config = &page.config.indicator;
    let Some(indicator) = dom::query_html(&page.document, &config.selector)? else {
        debug!("No {} on page, scroll indicator disabled", config.selector);
        return Ok(());
    };

    let mut state = IndicatorState::new(config.threshold);
    let window = page.window.clone();
    dom::on_scroll(&page.window, move || {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let Some(style) = state.update(scroll_y) else {
            return;
        };
        if let Err(err) = dom::set_styles(&indicator, &style.properties()) {
            warn!("Scroll indicator update failed: {err}");
        }
    })
}
