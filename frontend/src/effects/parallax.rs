use log::{debug, warn};

use crate::config::ParallaxConfig;
use crate::dom;
use crate::error::FxError;
use crate::frame::BrowserFrames;
use crate::init::Page;
use crate::throttle::FrameThrottle;

/// `None` past the ceiling: the image keeps its last offset.
pub fn transform_for(scroll_y: f64, config: &ParallaxConfig) -> Option<String> {
    (scroll_y < config.ceiling).then(|| format!("translateY({}px)", scroll_y * config.factor))
}

pub fn install(page: &Page) -> Result<(), FxError> {
    if !page.policy.allows_motion() {
        debug!("Reduced motion or small screen, parallax skipped");
        return Ok(());
    }
    let config = page.config.parallax.clone();
    let Some(image) = dom::query_html(&page.document, &config.selector)? else {
        debug!("No {} on page, parallax disabled", config.selector);
        return Ok(());
    };

    let window = page.window.clone();
    let throttle = FrameThrottle::new(BrowserFrames::new(window.clone()), move || {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let Some(transform) = transform_for(scroll_y, &config) else {
            return;
        };
        if let Err(err) = dom::set_styles(&image, &[("transform", transform.as_str())]) {
            warn!("Parallax update failed: {err}");
        }
    });
    dom::on_scroll(&page.window, move || {
        throttle.on_scroll();
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_is_proportional() {
        let config = ParallaxConfig::default();
        assert_eq!(transform_for(0.0, &config).as_deref(), Some("translateY(0px)"));
        assert_eq!(transform_for(250.0, &config).as_deref(), Some("translateY(25px)"));
    }

    #[test]
    fn test_no_write_at_or_past_ceiling() {
        let config = ParallaxConfig::default();
        assert!(transform_for(599.0, &config).is_some());
        assert_eq!(transform_for(600.0, &config), None);
        assert_eq!(transform_for(2000.0, &config), None);
    }
}
