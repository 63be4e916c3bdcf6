use std::rc::Rc;

use log::{info, warn};
use web_sys::{Document, Window};

use crate::config::FxConfig;
use crate::effects::{counter, fade_in, float_button, header, indicator, parallax};
use crate::error::FxError;
use crate::interactions::{accordion, anchor, tracking};
use crate::policy::MotionPolicy;
use crate::schedule;

/// Everything an installer needs, sampled once when the document is ready.
#[derive(Clone)]
pub struct Page {
    pub window: Window,
    pub document: Document,
    pub config: Rc<FxConfig>,
    pub policy: MotionPolicy,
}

impl Page {
    pub fn detect(window: Window, document: Document) -> Self {
        let config = FxConfig::load(&document);
        let policy = MotionPolicy::detect(&window, &config);
        Self {
            window,
            document,
            config: Rc::new(config),
            policy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Interaction handlers, before first paint.
    Immediate,
    /// Needs layout.
    NextFrame,
    /// Visual polish.
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    SmoothScroll,
    Accordion,
    ClickTracking,
    HeaderShadow,
    ScrollIndicator,
    FadeIn,
    FloatButton,
    Counter,
    Parallax,
}

impl Feature {
    /// Registration order.
    pub const ALL: [Feature; 9] = [
        Feature::SmoothScroll,
        Feature::Accordion,
        Feature::ClickTracking,
        Feature::HeaderShadow,
        Feature::ScrollIndicator,
        Feature::FadeIn,
        Feature::FloatButton,
        Feature::Counter,
        Feature::Parallax,
    ];

    pub fn tier(self) -> Tier {
        match self {
            Feature::SmoothScroll | Feature::Accordion | Feature::ClickTracking => Tier::Immediate,
            Feature::HeaderShadow | Feature::ScrollIndicator => Tier::NextFrame,
            Feature::FadeIn | Feature::FloatButton | Feature::Counter | Feature::Parallax => Tier::Idle,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Feature::SmoothScroll => "smooth scroll",
            Feature::Accordion => "accordion",
            Feature::ClickTracking => "click tracking",
            Feature::HeaderShadow => "header shadow",
            Feature::ScrollIndicator => "scroll indicator",
            Feature::FadeIn => "fade-in",
            Feature::FloatButton => "floating button",
            Feature::Counter => "counter",
            Feature::Parallax => "parallax",
        }
    }

    fn install(self, page: &Page) -> Result<(), FxError> {
        match self {
            Feature::SmoothScroll => anchor::install(page),
            Feature::Accordion => accordion::install(page),
            Feature::ClickTracking => tracking::install(page),
            Feature::HeaderShadow => header::install(page),
            Feature::ScrollIndicator => indicator::install(page),
            Feature::FadeIn => fade_in::install(page),
            Feature::FloatButton => float_button::install(page),
            Feature::Counter => counter::install(page),
            Feature::Parallax => parallax::install(page),
        }
    }
}

pub fn features_in(tier: Tier) -> impl Iterator<Item = Feature> {
    Feature::ALL.into_iter().filter(move |feature| feature.tier() == tier)
}

/// Installs every feature of `tier`. A failing feature is logged and skipped.
pub fn run_tier(page: &Page, tier: Tier) {
    for feature in features_in(tier) {
        if let Err(err) = feature.install(page) {
            warn!("Could not install {}: {err}", feature.name());
        }
    }
    info!("{:?} tier installed", tier);
}

pub fn start(page: Page) {
    run_tier(&page, Tier::Immediate);

    let next = page.clone();
    schedule::next_frame(&page.window, move || run_tier(&next, Tier::NextFrame));

    let idle = page.clone();
    schedule::when_idle(&page.window, page.config.idle_timeout_ms, move || {
        run_tier(&idle, Tier::Idle)
    });
}
