use std::cell::Cell;
use std::rc::Rc;

use crate::frame::FrameScheduler;

/// Coalesces scroll events into at most one update per rendered frame.
pub struct FrameThrottle<S> {
    scheduler: S,
    pending: Rc<Cell<bool>>,
    update: Rc<dyn Fn()>,
}

impl<S: FrameScheduler> FrameThrottle<S> {
    pub fn new(scheduler: S, update: impl Fn() + 'static) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(false)),
            update: Rc::new(update),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Returns true when this call requested a new frame.
    pub fn on_scroll(&self) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        let pending = self.pending.clone();
        let update = self.update.clone();
        self.scheduler.request_frame(Box::new(move |_: f64| {
            update();
            pending.set(false);
        }));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::testing::ManualFrames;

    fn counting_throttle(frames: &ManualFrames) -> (FrameThrottle<ManualFrames>, Rc<Cell<u32>>) {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let throttle = FrameThrottle::new(frames.clone(), move || counter.set(counter.get() + 1));
        (throttle, runs)
    }

    #[test]
    fn test_burst_within_one_frame_updates_once() {
        let frames = ManualFrames::default();
        let (header, header_runs) = counting_throttle(&frames);
        let (parallax, parallax_runs) = counting_throttle(&frames);

        for _ in 0..100 {
            header.on_scroll();
            parallax.on_scroll();
        }
        assert_eq!(frames.requested(), 2);
        assert!(header.is_pending());

        frames.render(16.0);
        assert_eq!(header_runs.get(), 1);
        assert_eq!(parallax_runs.get(), 1);
        assert!(!header.is_pending());
        assert!(!parallax.is_pending());
    }

    #[test]
    fn test_next_frame_can_be_requested_after_update() {
        let frames = ManualFrames::default();
        let (throttle, runs) = counting_throttle(&frames);

        assert!(throttle.on_scroll());
        assert!(!throttle.on_scroll());
        frames.render(16.0);
        assert!(throttle.on_scroll());
        frames.render(32.0);
        assert_eq!(runs.get(), 2);
        assert_eq!(frames.pending(), 0);
    }

    #[test]
    fn test_no_scroll_no_update() {
        let frames = ManualFrames::default();
        let (_throttle, runs) = counting_throttle(&frames);
        assert_eq!(frames.render(16.0), 0);
        assert_eq!(runs.get(), 0);
    }
}
