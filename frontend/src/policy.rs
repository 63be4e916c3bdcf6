use web_sys::Window;

use crate::config::FxConfig;

/// Media preferences sampled once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPolicy {
    pub reduced_motion: bool,
    pub small_screen: bool,
}

impl MotionPolicy {
    pub fn detect(window: &Window, config: &FxConfig) -> Self {
        Self {
            reduced_motion: matches(window, &config.reduced_motion_query),
            small_screen: matches(window, &config.small_screen_query()),
        }
    }

    /// Fade-in and parallax only run when this holds.
    pub fn allows_motion(&self) -> bool {
        !self.reduced_motion && !self.small_screen
    }

    pub fn allows_scroll_indicator(&self) -> bool {
        !self.small_screen
    }
}

fn matches(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .map(|list| list.matches())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_needs_both_preferences_clear() {
        assert!(MotionPolicy::default().allows_motion());
        let reduced = MotionPolicy { reduced_motion: true, small_screen: false };
        let small = MotionPolicy { reduced_motion: false, small_screen: true };
        assert!(!reduced.allows_motion());
        assert!(!small.allows_motion());
    }

    #[test]
    fn test_indicator_ignores_reduced_motion() {
        let reduced = MotionPolicy { reduced_motion: true, small_screen: false };
        assert!(reduced.allows_scroll_indicator());
        let small = MotionPolicy { reduced_motion: false, small_screen: true };
        assert!(!small.allows_scroll_indicator());
    }
}
