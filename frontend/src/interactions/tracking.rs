//! Outbound messaging link tracking.
//!
//! Both analytics globals are optional and may be installed after this
//! module starts, so they are looked up on every click. A missing global
//! resolves to [`NoopTracker`].

use std::rc::Rc;

use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::Window;

use crate::config::TrackingConfig;
use crate::dom;
use crate::error::FxError;
use crate::init::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadEvent {
    pub name: String,
    pub category: String,
    pub label: String,
}

impl From<&TrackingConfig> for LeadEvent {
    fn from(config: &TrackingConfig) -> Self {
        Self {
            name: config.event.clone(),
            category: config.category.clone(),
            label: config.label.clone(),
        }
    }
}

pub trait Tracker {
    fn name(&self) -> &'static str;
    fn track(&self, event: &LeadEvent) -> Result<(), FxError>;
}

pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn track(&self, _event: &LeadEvent) -> Result<(), FxError> {
        Ok(())
    }
}

/// Produces the tracker to use for one click.
pub type TrackerSource = Box<dyn Fn() -> Box<dyn Tracker>>;

#[derive(Debug, Serialize)]
pub struct GtagParams<'a> {
    pub event_category: &'a str,
    pub event_label: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLayerEntry<'a> {
    pub event: &'a str,
    pub event_category: &'a str,
    pub event_label: &'a str,
}

impl<'a> From<&'a LeadEvent> for GtagParams<'a> {
    fn from(event: &'a LeadEvent) -> Self {
        Self {
            event_category: &event.category,
            event_label: &event.label,
        }
    }
}

impl<'a> From<&'a LeadEvent> for DataLayerEntry<'a> {
    fn from(event: &'a LeadEvent) -> Self {
        Self {
            event: &event.name,
            event_category: &event.category,
            event_label: &event.label,
        }
    }
}

/// `gtag('event', name, params)`
pub struct GtagTracker {
    gtag: Function,
}

impl GtagTracker {
    pub fn resolve(window: &Window) -> Box<dyn Tracker> {
        match global(window, "gtag").and_then(|value| value.dyn_into::<Function>().ok()) {
            Some(gtag) => Box::new(Self { gtag }),
            None => Box::new(NoopTracker),
        }
    }
}

impl Tracker for GtagTracker {
    fn name(&self) -> &'static str {
        "gtag"
    }

    fn track(&self, event: &LeadEvent) -> Result<(), FxError> {
        let params = serde_wasm_bindgen::to_value(&GtagParams::from(event))?;
        self.gtag.call3(
            &JsValue::UNDEFINED,
            &JsValue::from_str("event"),
            &JsValue::from_str(&event.name),
            &params,
        )?;
        Ok(())
    }
}

/// `dataLayer.push(entry)` for Tag Manager.
pub struct DataLayerTracker {
    layer: JsValue,
    push: Function,
}

impl DataLayerTracker {
    pub fn resolve(window: &Window) -> Box<dyn Tracker> {
        let resolved = global(window, "dataLayer").and_then(|layer| {
            let push = Reflect::get(&layer, &JsValue::from_str("push")).ok()?;
            let push = push.dyn_into::<Function>().ok()?;
            Some(Self { layer, push })
        });
        match resolved {
            Some(tracker) => Box::new(tracker),
            None => Box::new(NoopTracker),
        }
    }
}

impl Tracker for DataLayerTracker {
    fn name(&self) -> &'static str {
        "dataLayer"
    }

    fn track(&self, event: &LeadEvent) -> Result<(), FxError> {
        let entry = serde_wasm_bindgen::to_value(&DataLayerEntry::from(event))?;
        self.push.call1(&self.layer, &entry)?;
        Ok(())
    }
}

fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

pub fn link_selector(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|pattern| format!("a[href*=\"{pattern}\"]"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct ClickTracking {
    patterns: Vec<String>,
    event: LeadEvent,
    sources: Vec<TrackerSource>,
}

impl ClickTracking {
    pub fn new(config: &TrackingConfig, sources: Vec<TrackerSource>) -> Self {
        Self {
            patterns: config.link_patterns.clone(),
            event: LeadEvent::from(config),
            sources,
        }
    }

    pub fn is_tracked(&self, href: &str) -> bool {
        self.patterns.iter().any(|pattern| href.contains(pattern.as_str()))
    }

    /// Reports a click on `href`. Returns false when the link is not tracked.
    pub fn on_click(&self, href: &str) -> bool {
        if !self.is_tracked(href) {
            return false;
        }
        for source in &self.sources {
            let tracker = source();
            if let Err(err) = tracker.track(&self.event) {
                warn!("{} tracking failed: {err}", tracker.name());
            }
        }
        true
    }
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let config = &page.config.tracking;
    if !config.enabled || config.link_patterns.is_empty() {
        debug!("Click tracking disabled");
        return Ok(());
    }
    let links = dom::query_all(&page.document, &link_selector(&config.link_patterns))?;
    if links.is_empty() {
        return Ok(());
    }

    let gtag_window = page.window.clone();
    let layer_window = page.window.clone();
    let tracking = Rc::new(ClickTracking::new(
        config,
        vec![
            Box::new(move || GtagTracker::resolve(&gtag_window)) as TrackerSource,
            Box::new(move || DataLayerTracker::resolve(&layer_window)) as TrackerSource,
        ],
    ));

    for link in links {
        let tracking = tracking.clone();
        let href_source = link.clone();
        dom::listen(&link, "click", true, move |_| {
            if let Some(href) = href_source.get_attribute("href") {
                tracking.on_click(&href);
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<(&'static str, LeadEvent)>>>,
    }

    struct RecordingTracker {
        name: &'static str,
        recorder: Recorder,
    }

    impl Tracker for RecordingTracker {
        fn name(&self) -> &'static str {
            self.name
        }

        fn track(&self, event: &LeadEvent) -> Result<(), FxError> {
            self.recorder.events.borrow_mut().push((self.name, event.clone()));
            Ok(())
        }
    }

    struct FailingTracker;

    impl Tracker for FailingTracker {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn track(&self, _event: &LeadEvent) -> Result<(), FxError> {
            Err(FxError::Js("gtag threw".to_string()))
        }
    }

    fn source(name: &'static str, recorder: &Recorder) -> TrackerSource {
        let recorder = recorder.clone();
        Box::new(move || -> Box<dyn Tracker> {
            Box::new(RecordingTracker {
                name,
                recorder: recorder.clone(),
            })
        })
    }

    fn tracking(recorder: &Recorder) -> ClickTracking {
        ClickTracking::new(
            &TrackingConfig::default(),
            vec![source("gtag", recorder), source("dataLayer", recorder)],
        )
    }

    #[test]
    fn test_whatsapp_click_fires_both_trackers() {
        let recorder = Recorder::default();
        assert!(tracking(&recorder).on_click("https://wa.me/5511999999999?text=Oi"));

        let events = recorder.events.borrow();
        let names: Vec<_> = events.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["gtag", "dataLayer"]);
        for (_, event) in events.iter() {
            assert_eq!(event.name, "whatsapp_click");
            assert_eq!(event.category, "engagement");
            assert_eq!(event.label, "WhatsApp Lead");
        }
    }

    #[test]
    fn test_other_links_fire_nothing() {
        let recorder = Recorder::default();
        let tracking = tracking(&recorder);
        assert!(!tracking.on_click("https://example.com/contact"));
        assert!(!tracking.on_click("#faq"));
        assert!(recorder.events.borrow().is_empty());
    }

    #[test]
    fn test_short_link_domain_is_tracked() {
        let recorder = Recorder::default();
        assert!(tracking(&recorder).on_click("https://wa.link/abc123"));
        assert_eq!(recorder.events.borrow().len(), 2);
    }

    #[test]
    fn test_absent_and_failing_trackers_do_not_stop_dispatch() {
        let recorder = Recorder::default();
        let tracking = ClickTracking::new(
            &TrackingConfig::default(),
            vec![
                Box::new(|| Box::new(NoopTracker) as Box<dyn Tracker>) as TrackerSource,
                Box::new(|| Box::new(FailingTracker) as Box<dyn Tracker>) as TrackerSource,
                source("dataLayer", &recorder),
            ],
        );
        assert!(tracking.on_click("https://wa.me/1"));
        assert_eq!(recorder.events.borrow().len(), 1);
    }

    #[test]
    fn test_link_selector() {
        let patterns = TrackingConfig::default().link_patterns;
        assert_eq!(link_selector(&patterns), r#"a[href*="wa.me"], a[href*="wa.link"]"#);
    }

    #[test]
    fn test_payload_shapes_per_tracker() {
        let event = LeadEvent::from(&TrackingConfig::default());
        assert_eq!(
            serde_json::to_value(GtagParams::from(&event)).unwrap(),
            json!({"event_category": "engagement", "event_label": "WhatsApp Lead"})
        );
        assert_eq!(
            serde_json::to_value(DataLayerEntry::from(&event)).unwrap(),
            json!({"event": "whatsapp_click", "eventCategory": "engagement", "eventLabel": "WhatsApp Lead"})
        );
    }
}
