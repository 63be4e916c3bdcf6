//! Viewport watching.
//!
//! [`Watcher`] holds the observed set and decides what each intersection
//! notification means; [`ViewportWatcher`] feeds it from an
//! `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::FxError;

pub enum Watch<K> {
    /// Fires the first time the target intersects, then releases it.
    OneShot(Box<dyn FnMut(&K)>),
    /// Fires on every enter and exit with the current intersection state.
    Continuous(Box<dyn FnMut(&K, bool)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Ignored,
    Fired,
    /// Fired and dropped from the observed set; the observer must stop watching it.
    Released,
}

pub struct Watcher<K> {
    watch: Watch<K>,
    observed: Vec<K>,
}

impl<K: PartialEq> Watcher<K> {
    pub fn new(watch: Watch<K>) -> Self {
        Self {
            watch,
            observed: Vec::new(),
        }
    }

    /// Returns false if the target is already observed.
    pub fn observe(&mut self, target: K) -> bool {
        if self.is_observed(&target) {
            return false;
        }
        self.observed.push(target);
        true
    }

    pub fn is_observed(&self, target: &K) -> bool {
        self.observed.iter().any(|k| k == target)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn notify(&mut self, target: &K, intersecting: bool) -> Transition {
        let Some(index) = self.observed.iter().position(|k| k == target) else {
            return Transition::Ignored;
        };
        match &mut self.watch {
            Watch::OneShot(callback) => {
                if !intersecting {
                    return Transition::Ignored;
                }
                let target = self.observed.swap_remove(index);
                callback(&target);
                Transition::Released
            }
            Watch::Continuous(callback) => {
                callback(target, intersecting);
                Transition::Fired
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub threshold: f64,
    pub root_margin: Option<String>,
}

impl WatchOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: None,
        }
    }

    pub fn with_root_margin(mut self, margin: impl Into<String>) -> Self {
        self.root_margin = Some(margin.into());
        self
    }
}

pub struct ViewportWatcher {
    observer: IntersectionObserver,
    watcher: Rc<RefCell<Watcher<Element>>>,
}

impl ViewportWatcher {
    pub fn new(options: &WatchOptions, watch: Watch<Element>) -> Result<Self, FxError> {
        let watcher = Rc::new(RefCell::new(Watcher::new(watch)));

        let shared = watcher.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let transition = shared.borrow_mut().notify(&target, entry.is_intersecting());
                    if transition == Transition::Released {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        if let Some(margin) = &options.root_margin {
            init.set_root_margin(margin);
        }
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        // The observer calls back for as long as the page lives
        callback.forget();

        Ok(Self { observer, watcher })
    }

    pub fn observe(&self, target: &Element) {
        if self.watcher.borrow_mut().observe(target.clone()) {
            self.observer.observe(target);
        }
    }

    pub fn len(&self) -> usize {
        self.watcher.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_shot() -> (Watcher<u32>, Rc<RefCell<Vec<u32>>>) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let log = fired.clone();
        let watcher = Watcher::new(Watch::OneShot(Box::new(move |k: &u32| log.borrow_mut().push(*k))));
        (watcher, fired)
    }

    #[test]
    fn test_one_shot_fires_exactly_once() {
        let (mut watcher, fired) = one_shot();
        watcher.observe(1);
        watcher.observe(2);

        assert_eq!(watcher.notify(&1, false), Transition::Ignored);
        assert_eq!(watcher.notify(&1, true), Transition::Released);
        for _ in 0..5 {
            assert_eq!(watcher.notify(&1, false), Transition::Ignored);
            assert_eq!(watcher.notify(&1, true), Transition::Ignored);
        }

        assert_eq!(*fired.borrow(), vec![1]);
        assert!(!watcher.is_observed(&1));
        assert!(watcher.is_observed(&2));
    }

    #[test]
    fn test_every_one_shot_target_released_once() {
        let (mut watcher, fired) = one_shot();
        for k in 0..4 {
            watcher.observe(k);
        }
        let released = (0..4)
            .chain(0..4)
            .filter(|k| watcher.notify(k, true) == Transition::Released)
            .count();
        assert_eq!(released, 4);
        assert_eq!(watcher.len(), 0);
        assert_eq!(fired.borrow().len(), 4);
    }

    #[test]
    fn test_continuous_reports_enter_and_exit() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let mut watcher = Watcher::new(Watch::Continuous(Box::new(move |k: &u32, visible: bool| {
            log.borrow_mut().push((*k, visible))
        })));
        watcher.observe(7);

        assert_eq!(watcher.notify(&7, true), Transition::Fired);
        assert_eq!(watcher.notify(&7, false), Transition::Fired);
        assert_eq!(watcher.notify(&7, true), Transition::Fired);

        assert_eq!(*seen.borrow(), vec![(7, true), (7, false), (7, true)]);
        assert!(watcher.is_observed(&7));
    }

    #[test]
    fn test_unknown_target_ignored() {
        let (mut watcher, fired) = one_shot();
        assert_eq!(watcher.notify(&3, true), Transition::Ignored);
        assert!(fired.borrow().is_empty());
    }

    #[test]
    fn test_observe_twice_registers_once() {
        let (mut watcher, _) = one_shot();
        assert!(watcher.observe(1));
        assert!(!watcher.observe(1));
        assert_eq!(watcher.len(), 1);
    }

    #[test]
    fn test_watch_options() {
        let options = WatchOptions::threshold(0.1).with_root_margin("0px 0px -10% 0px");
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin.as_deref(), Some("0px 0px -10% 0px"));
        assert_eq!(WatchOptions::threshold(0.5).root_margin, None);
    }
}
