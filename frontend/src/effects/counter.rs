//! Stat counter that ticks up from zero once it scrolls into view.

use std::rc::Rc;

use log::debug;
use web_sys::Element;

use crate::dom;
use crate::error::FxError;
use crate::frame::{BrowserFrames, FrameScheduler};
use crate::init::Page;
use crate::watch::{ViewportWatcher, Watch, WatchOptions};

/// Attribute that overrides the configured target for one counter element.
pub const TARGET_ATTRIBUTE: &str = "data-count-target";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    Running(u32),
    Done(u32),
}

/// Linear count keyed to frame timestamps. The first frame defines the start.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u32,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CounterAnimation {
    pub fn new(target: u32, duration_ms: f64) -> Self {
        Self {
            target,
            duration_ms,
            started_at: None,
        }
    }

    pub fn progress(&self, timestamp: f64) -> f64 {
        let start = self.started_at.unwrap_or(timestamp);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((timestamp - start) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn frame(&mut self, timestamp: f64) -> CounterFrame {
        self.started_at.get_or_insert(timestamp);
        let progress = self.progress(timestamp);
        if progress >= 1.0 {
            return CounterFrame::Done(self.target);
        }
        CounterFrame::Running((progress * self.target as f64).floor() as u32)
    }
}

pub fn label(value: u32) -> String {
    format!("+{value}")
}

/// Drives `animation` one frame at a time, rendering each label.
pub fn animate<S>(scheduler: S, animation: CounterAnimation, render: Rc<dyn Fn(&str)>)
where
    S: FrameScheduler + Clone + 'static,
{
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move |ts| step(next, animation, render, ts)));
}

fn step<S>(scheduler: S, mut animation: CounterAnimation, render: Rc<dyn Fn(&str)>, timestamp: f64)
where
    S: FrameScheduler + Clone + 'static,
{
    match animation.frame(timestamp) {
        CounterFrame::Running(value) => {
            render(&label(value));
            animate(scheduler, animation, render);
        }
        CounterFrame::Done(value) => render(&label(value)),
    }
}

fn target_for(element: &Element, fallback: u32) -> u32 {
    element
        .get_attribute(TARGET_ATTRIBUTE)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(fallback)
}

pub fn install(page: &Page) -> Result<(), FxError> {
    let config = &page.config.counter;
    let counters = dom::query_all(&page.document, &config.selector)?;
    if counters.is_empty() {
        debug!("No {} on page, counter disabled", config.selector);
        return Ok(());
    }

    let frames = BrowserFrames::new(page.window.clone());
    let (fallback, duration_ms) = (config.target, config.duration_ms);
    let watcher = ViewportWatcher::new(
        &WatchOptions::threshold(config.threshold),
        Watch::OneShot(Box::new(move |element: &Element| {
            let target = target_for(element, fallback);
            let element = element.clone();
            let render: Rc<dyn Fn(&str)> = Rc::new(move |text: &str| element.set_text_content(Some(text)));
            animate(frames.clone(), CounterAnimation::new(target, duration_ms), render);
        })),
    )?;

    for counter in &counters {
        watcher.observe(counter);
    }
    debug!("Watching {} counter(s)", watcher.len());
    Ok(())
}
