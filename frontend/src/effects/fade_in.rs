use log::debug;
use web_sys::Element;

use crate::dom;
use crate::error::FxError;
use crate::init::Page;
use crate::policy::MotionPolicy;
use crate::watch::{ViewportWatcher, Watch, WatchOptions};

pub const FADE_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

pub fn stagger_class(index: usize, steps: usize) -> String {
    format!("stagger-{}", index % steps.max(1) + 1)
}

/// Stagger class for each of `count` elements, or nothing when motion is off.
pub fn stagger_plan(policy: &MotionPolicy, count: usize, steps: usize) -> Vec<String> {
    if !policy.allows_motion() {
        return Vec::new();
    }
    (0..count).map(|index| stagger_class(index, steps)).collect()
}

pub fn install(page: &Page) -> Result<(), FxError> {
    if !page.policy.allows_motion() {
        debug!("Reduced motion or small screen, fade-in skipped");
        return Ok(());
    }
    let config = &page.config.fade_in;
    let elements = dom::query_all(&page.document, &config.selector())?;
    let plan = stagger_plan(&page.policy, elements.len(), config.stagger_steps);

    let watcher = ViewportWatcher::new(
        &WatchOptions::threshold(config.threshold).with_root_margin(config.root_margin.as_str()),
        Watch::OneShot(Box::new(|element: &Element| {
            let _ = element.class_list().add_1(VISIBLE_CLASS);
        })),
    )?;

    for (element, stagger) in elements.iter().zip(&plan) {
        element.class_list().add_2(FADE_CLASS, stagger)?;
        watcher.observe(element);
    }
    debug!("Fade-in watching {} element(s)", watcher.len());
    Ok(())
}
