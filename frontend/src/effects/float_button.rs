use log::{debug, warn};
use web_sys::Element;

use crate::dom;
use crate::error::FxError;
use crate::init::Page;
use crate::watch::{ViewportWatcher, Watch, WatchOptions};

/// Button is shrunk and dimmed while the hero section is on screen.
pub fn style_for(hero_visible: bool) -> [(&'static str, &'static str); 2] {
    if hero_visible {
        [("transform", "scale(0.9)"), ("opacity", "0.85")]
    } else {
        [("transform", "scale(1)"), ("opacity", "1")]
    }
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let config = &page.config.float_button;
    let button = dom::query_html(&page.document, &config.button_selector)?;
    let hero = page.document.query_selector(&config.section_selector)?;
    let (Some(button), Some(hero)) = (button, hero) else {
        debug!("Floating button or hero missing, button effect disabled");
        return Ok(());
    };

    let watcher = ViewportWatcher::new(
        &WatchOptions::threshold(config.threshold),
        Watch::Continuous(Box::new(move |_: &Element, visible: bool| {
            if let Err(err) = dom::set_styles(&button, &style_for(visible)) {
                warn!("Floating button update failed: {err}");
            }
        })),
    )?;
    watcher.observe(&hero);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimmed_while_hero_visible() {
        assert_eq!(style_for(true), [("transform", "scale(0.9)"), ("opacity", "0.85")]);
        assert_eq!(style_for(false), [("transform", "scale(1)"), ("opacity", "1")]);
    }
}
